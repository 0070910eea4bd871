//! Wire-level data model shared between the codec and the session layer.

/// Tokens identifying an authenticated listener, as returned by the
/// authentication call.
#[derive(Debug, Clone)]
pub struct UserInfo {
    pub web_auth_token: String,
    pub auth_token: String,
    pub listener_id: String,
}

/// A server-side radio channel.  The id is server-assigned and stable; the
/// display name can change through a rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub id: String,
    pub name: String,
}

/// Listener feedback on a song.  A rating can be set to loved or banned, but
/// never reverted to `None` once given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    None,
    Loved,
    Banned,
}

/// One playlist entry.  The matching and user seeds are opaque identifiers
/// the server needs to attribute feedback to the right playback context.
#[derive(Debug, Clone)]
pub struct Song {
    pub title: String,
    pub artist: String,
    pub music_id: String,
    pub audio_url: String,
    pub matching_seed: String,
    pub user_seed: String,
    /// Not always present in server responses.
    pub focus_trait_id: Option<String>,
    pub rating: Rating,
}

/// Outcome of a music search, owned by the caller.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub artists: Vec<SearchArtist>,
    pub songs: Vec<SearchSong>,
}

#[derive(Debug, Clone)]
pub struct SearchArtist {
    pub name: String,
    pub music_id: String,
}

#[derive(Debug, Clone)]
pub struct SearchSong {
    pub title: String,
    pub artist: String,
    pub music_id: String,
}
