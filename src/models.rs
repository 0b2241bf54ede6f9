// Wire records for the Toniebox API. Field names are the server's and must
// round-trip unchanged; anything client-side (the owning client and
// household, the dirty flag) is `#[serde(skip)]` and never leaves the process.
// The API sends `null` for unset fields; every wire field decodes it as the
// type's zero value.

use serde::{Deserialize, Deserializer, Serialize};

/// Personal information about the logged-in account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Me {
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub uuid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sex: String,
    #[serde(deserialize_with = "null_as_default")]
    pub accepted_terms_of_use: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub tracking: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub auth_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub profile_image: String,
    #[serde(rename = "isVerified", deserialize_with = "null_as_default")]
    pub verified: bool,
    #[serde(rename = "isEduUser", deserialize_with = "null_as_default")]
    pub edu_user: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub notification_count: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub requires_verification_to_upload: bool,
}

/// A family or group sharing Tonieboxes and Creative-Tonies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Household {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(deserialize_with = "null_as_default")]
    pub foreign_creative_tonie_content: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub access: String,
    #[serde(deserialize_with = "null_as_default")]
    pub can_leave: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub owner_name: String,
}

/// One audio track on a Creative-Tonie.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Chapter {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub file: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub seconds: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub transcoding: bool,
}

/// Which client instance and household a tonie was fetched through.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TonieContext {
    pub(crate) household: Household,
    pub(crate) client_id: u64,
}

/// A Creative-Tonie figurine and its chapters.
///
/// Local mutations (`set_name`, `delete_chapter`, uploads) only change this
/// in-memory copy and mark it dirty; they reach the server when the tonie is
/// passed to `Client::commit`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreativeTonie {
    #[serde(deserialize_with = "null_as_default")]
    id: String,
    #[serde(deserialize_with = "null_as_default")]
    name: String,
    #[serde(deserialize_with = "null_as_default")]
    live: bool,
    #[serde(deserialize_with = "null_as_default")]
    private: bool,
    #[serde(deserialize_with = "null_as_default")]
    image_url: String,
    #[serde(deserialize_with = "null_as_default")]
    transcoding_errors: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    transcoding: bool,
    #[serde(deserialize_with = "null_as_default")]
    seconds_present: f64,
    #[serde(deserialize_with = "null_as_default")]
    seconds_remaining: f64,
    #[serde(deserialize_with = "null_as_default")]
    chapters_present: u32,
    #[serde(deserialize_with = "null_as_default")]
    chapters_remaining: u32,
    #[serde(deserialize_with = "null_as_default")]
    chapters: Vec<Chapter>,
    #[serde(deserialize_with = "null_as_default")]
    household_id: String,

    #[serde(skip)]
    context: Option<TonieContext>,
    #[serde(skip)]
    dirty: bool,
}

impl CreativeTonie {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn live(&self) -> bool {
        self.live
    }

    pub fn private(&self) -> bool {
        self.private
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn transcoding(&self) -> bool {
        self.transcoding
    }

    pub fn transcoding_errors(&self) -> &[String] {
        &self.transcoding_errors
    }

    pub fn seconds_present(&self) -> f64 {
        self.seconds_present
    }

    pub fn seconds_remaining(&self) -> f64 {
        self.seconds_remaining
    }

    pub fn chapters_present(&self) -> u32 {
        self.chapters_present
    }

    pub fn chapters_remaining(&self) -> u32 {
        self.chapters_remaining
    }

    /// Chapters in playback order; uploads are appended at the end.
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn household_id(&self) -> &str {
        &self.household_id
    }

    /// Household this tonie was listed under, if it came from a client.
    pub fn household(&self) -> Option<&Household> {
        self.context.as_ref().map(|c| &c.household)
    }

    /// True when there are local changes not yet committed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.name != name {
            self.name = name;
            self.dirty = true;
        }
    }

    pub fn set_private(&mut self, private: bool) {
        if self.private != private {
            self.private = private;
            self.dirty = true;
        }
    }

    pub fn set_live(&mut self, live: bool) {
        if self.live != live {
            self.live = live;
            self.dirty = true;
        }
    }

    /// First chapter whose title equals `title` exactly.
    pub fn find_chapter_by_title(&self, title: &str) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.title == title)
    }

    /// Removes every chapter sharing `chapter`'s id and returns how many went.
    pub fn delete_chapter(&mut self, chapter: &Chapter) -> usize {
        self.delete_chapter_by_id(&chapter.id)
    }

    pub fn delete_chapter_by_id(&mut self, chapter_id: &str) -> usize {
        let before = self.chapters.len();
        self.chapters.retain(|c| c.id != chapter_id);
        let removed = before - self.chapters.len();
        if removed > 0 {
            self.dirty = true;
        }
        removed
    }

    /// Moves the chapter at `from` so it ends up at position `to`, shifting
    /// the ones in between. Returns false if either index is out of range.
    pub fn move_chapter(&mut self, from: usize, to: usize) -> bool {
        let len = self.chapters.len();
        if from >= len || to >= len {
            return false;
        }
        if from != to {
            let chapter = self.chapters.remove(from);
            self.chapters.insert(to, chapter);
            self.dirty = true;
        }
        true
    }

    /// Retitles every chapter with id `chapter_id`; returns how many changed.
    pub fn rename_chapter(&mut self, chapter_id: &str, title: &str) -> usize {
        let mut renamed = 0;
        for chapter in self.chapters.iter_mut().filter(|c| c.id == chapter_id) {
            if chapter.title != title {
                chapter.title = title.to_string();
                renamed += 1;
            }
        }
        if renamed > 0 {
            self.dirty = true;
        }
        renamed
    }

    pub(crate) fn push_chapter(&mut self, chapter: Chapter) {
        self.chapters.push(chapter);
        self.dirty = true;
    }

    pub(crate) fn context(&self) -> Option<&TonieContext> {
        self.context.as_ref()
    }

    pub(crate) fn attach(&mut self, household: Household, client_id: u64) {
        self.context = Some(TonieContext {
            household,
            client_id,
        });
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Take every server-side field from `fresh`, keeping this instance's
    /// context. Local changes are discarded.
    pub(crate) fn overwrite_from(&mut self, fresh: CreativeTonie) {
        let CreativeTonie {
            id,
            name,
            live,
            private,
            image_url,
            transcoding_errors,
            transcoding,
            seconds_present,
            seconds_remaining,
            chapters_present,
            chapters_remaining,
            chapters,
            household_id,
            ..
        } = fresh;

        self.id = id;
        self.name = name;
        self.live = live;
        self.private = private;
        self.image_url = image_url;
        self.transcoding_errors = transcoding_errors;
        self.transcoding = transcoding;
        self.seconds_present = seconds_present;
        self.seconds_remaining = seconds_remaining;
        self.chapters_present = chapters_present;
        self.chapters_remaining = chapters_remaining;
        self.chapters = chapters;
        self.household_id = household_id;
        self.dirty = false;
    }
}

// The API sends `null` rather than `[]` for some empty lists.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
