//! Demo catalog: what each route shows.
//!
//! Content is generated from the route alone, so every visit to a path
//! produces the same rows and a restored offset lands on the same item.

use crate::model::RoutePath;

/// Albums listed on the home view.
pub const ALBUM_COUNT: u32 = 40;
/// Playlists listed on the home view.
pub const PLAYLIST_COUNT: u32 = 12;
/// Tracks on every album.
pub const TRACKS_PER_ALBUM: u32 = 24;
/// Tracks on every playlist.
pub const TRACKS_PER_PLAYLIST: u32 = 30;

/// Which view a route resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// `/`: albums followed by playlists.
    Home,
    /// `/album/<n>`.
    Album(u32),
    /// `/playlist/<n>`.
    Playlist(u32),
    /// Anything else.
    NotFound,
}

impl ViewKind {
    /// Resolve a route.
    pub fn resolve(path: &RoutePath) -> Self {
        let segments: Vec<&str> = path.segments().collect();
        match segments.as_slice() {
            [] => Self::Home,
            ["album", n] => parse_index(n, ALBUM_COUNT).map_or(Self::NotFound, Self::Album),
            ["playlist", n] => {
                parse_index(n, PLAYLIST_COUNT).map_or(Self::NotFound, Self::Playlist)
            }
            _ => Self::NotFound,
        }
    }

    /// Header title.
    pub fn title(self) -> String {
        match self {
            Self::Home => "Library".to_string(),
            Self::Album(n) => album_title(n),
            Self::Playlist(n) => playlist_title(n),
            Self::NotFound => "Not found".to_string(),
        }
    }

    /// Rows shown in the content list.
    pub fn rows(self) -> Vec<Row> {
        match self {
            Self::Home => home_rows(),
            Self::Album(n) => album_rows(n),
            Self::Playlist(n) => playlist_rows(n),
            Self::NotFound => Vec::new(),
        }
    }
}

/// One entry of the content list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Item id, matched against the liked-track index.
    pub id: String,
    /// Primary line.
    pub title: String,
    /// Secondary line, hidden in compact layout.
    pub detail: String,
    /// Where Enter goes from this row.
    pub target: Option<RoutePath>,
}

fn parse_index(raw: &str, max: u32) -> Option<u32> {
    raw.parse::<u32>().ok().filter(|n| (1..=max).contains(n))
}

fn album_title(n: u32) -> String {
    format!("Album {n:02}")
}

fn playlist_title(n: u32) -> String {
    format!("Playlist {n:02}")
}

fn route(raw: String) -> Option<RoutePath> {
    RoutePath::new(raw).ok()
}

fn track_id(album: u32, track: u32) -> u32 {
    album * 100 + track
}

fn duration(id: u32) -> String {
    let seconds = 150 + (id * 37) % 180;
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

fn home_rows() -> Vec<Row> {
    let albums = (1..=ALBUM_COUNT).map(|n| Row {
        id: format!("album-{n}"),
        title: album_title(n),
        detail: format!("{TRACKS_PER_ALBUM} tracks"),
        target: route(format!("/album/{n}")),
    });
    let playlists = (1..=PLAYLIST_COUNT).map(|n| Row {
        id: format!("playlist-{n}"),
        title: playlist_title(n),
        detail: format!("{TRACKS_PER_PLAYLIST} tracks"),
        target: route(format!("/playlist/{n}")),
    });
    albums.chain(playlists).collect()
}

/// Album tracks link to a playlist that features them.
fn album_rows(album: u32) -> Vec<Row> {
    (1..=TRACKS_PER_ALBUM)
        .map(|track| {
            let id = track_id(album, track);
            let playlist = (album + track) % PLAYLIST_COUNT + 1;
            Row {
                id: id.to_string(),
                title: format!("{track:02}. Track {id}"),
                detail: format!("{}  ·  on {}", duration(id), playlist_title(playlist)),
                target: route(format!("/playlist/{playlist}")),
            }
        })
        .collect()
}

/// Playlist tracks link back to their album.
fn playlist_rows(playlist: u32) -> Vec<Row> {
    (0..TRACKS_PER_PLAYLIST)
        .map(|slot| {
            let album = (playlist * 7 + slot) % ALBUM_COUNT + 1;
            let track = slot % TRACKS_PER_ALBUM + 1;
            let id = track_id(album, track);
            Row {
                id: id.to_string(),
                title: format!("{:02}. Track {id}", slot + 1),
                detail: format!("{}  ·  from {}", duration(id), album_title(album)),
                target: route(format!("/album/{album}")),
            }
        })
        .collect()
}
