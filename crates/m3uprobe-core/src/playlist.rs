//! Plain-text scanning of HLS playlists.
//!
//! Only what liveness probing needs: the `#EXTM3U` marker and the URI lines
//! that follow `#EXT-X-STREAM-INF:` / `#EXTINF:` tags. Not a general M3U8
//! parser; attribute lists and other tags are ignored.

/// Marker every HLS playlist begins with.
pub const PLAYLIST_MARKER: &str = "#EXTM3U";

/// Tag introducing a variant playlist reference in a master playlist.
pub const STREAM_INF_TAG: &str = "#EXT-X-STREAM-INF:";

/// Tag introducing a media segment reference in a media playlist.
pub const EXTINF_TAG: &str = "#EXTINF:";

/// True if the body (ignoring leading whitespace) starts with `#EXTM3U`.
pub fn looks_like_playlist(body: &str) -> bool {
    body.trim_start().starts_with(PLAYLIST_MARKER)
}

/// Collects the nested URI references of a playlist, in order of appearance.
///
/// Lines are trimmed and blank lines dropped before scanning. For each
/// stream-inf or extinf tag, the immediately following non-comment line is
/// the URI reference (relative or absolute); the scan then resumes after
/// that pair.
pub fn candidate_uris(body: &str) -> Vec<String> {
    let lines: Vec<&str> = body
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut uris = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        if lines[i].starts_with(STREAM_INF_TAG) || lines[i].starts_with(EXTINF_TAG) {
            if i + 1 < lines.len() && !lines[i + 1].starts_with('#') {
                uris.push(lines[i + 1].to_string());
            }
            i += 2;
        } else {
            i += 1;
        }
    }
    uris
}
