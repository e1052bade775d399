//! Parsing of catalog links.
//!
//! Two spellings are accepted for every resource kind:
//! - URI form: `spotify:track:4uLU6hMCjMI75M1A2tKUQC`
//! - URL form: `https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC?si=...`
//!
//! IDs are always 22 base62 characters.

use once_cell::sync::Lazy;
use regex::Regex;

/// What a parsed link points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Track,
    Album,
    Playlist,
    Episode,
}

impl LinkKind {
    fn from_str(s: &str) -> Option<Self> {
        match s {
            "track" => Some(Self::Track),
            "album" => Some(Self::Album),
            "playlist" => Some(Self::Playlist),
            "episode" => Some(Self::Episode),
            _ => None,
        }
    }
}

/// A parsed catalog link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotifyLink {
    pub kind: LinkKind,
    pub id: String,
}

static URI_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^spotify:(track|album|playlist|episode):([0-9a-zA-Z]{22})$")
        .expect("valid URI regex")
});

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:https?://)?open\.spotify\.com/(track|album|playlist|episode)/([0-9a-zA-Z]{22})(?:\?si=.+)?$",
    )
    .expect("valid URL regex")
});

impl SpotifyLink {
    /// Parse a URI or URL into a link. Returns `None` when neither
    /// spelling matches.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        let captures = URI_RE.captures(input).or_else(|| URL_RE.captures(input))?;

        let kind = LinkKind::from_str(captures.get(1)?.as_str())?;
        let id = captures.get(2)?.as_str().to_string();

        Some(Self { kind, id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACK_ID: &str = "4uLU6hMCjMI75M1A2tKUQC";

    #[test]
    fn test_parse_track_uri() {
        let link = SpotifyLink::parse(&format!("spotify:track:{TRACK_ID}")).unwrap();
        assert_eq!(link.kind, LinkKind::Track);
        assert_eq!(link.id, TRACK_ID);
    }

    #[test]
    fn test_parse_track_url() {
        let link =
            SpotifyLink::parse(&format!("https://open.spotify.com/track/{TRACK_ID}")).unwrap();
        assert_eq!(link.kind, LinkKind::Track);
        assert_eq!(link.id, TRACK_ID);
    }

    #[test]
    fn test_parse_url_without_scheme() {
        let link = SpotifyLink::parse(&format!("open.spotify.com/album/{TRACK_ID}")).unwrap();
        assert_eq!(link.kind, LinkKind::Album);
    }

    #[test]
    fn test_parse_url_with_share_query() {
        let link = SpotifyLink::parse(&format!(
            "https://open.spotify.com/playlist/{TRACK_ID}?si=abc123DEF"
        ))
        .unwrap();
        assert_eq!(link.kind, LinkKind::Playlist);
        assert_eq!(link.id, TRACK_ID);
    }

    #[test]
    fn test_parse_episode() {
        let link = SpotifyLink::parse(&format!("spotify:episode:{TRACK_ID}")).unwrap();
        assert_eq!(link.kind, LinkKind::Episode);
    }

    #[test]
    fn test_reject_unknown_kind() {
        assert!(SpotifyLink::parse(&format!("spotify:artist:{TRACK_ID}")).is_none());
        assert!(SpotifyLink::parse(&format!("https://open.spotify.com/show/{TRACK_ID}")).is_none());
    }

    #[test]
    fn test_reject_bad_id_length() {
        assert!(SpotifyLink::parse("spotify:track:tooShort").is_none());
        assert!(
            SpotifyLink::parse(&format!("spotify:track:{TRACK_ID}extra")).is_none(),
            "23+ char ids must not parse"
        );
    }

    #[test]
    fn test_reject_other_hosts() {
        assert!(SpotifyLink::parse(&format!("https://example.com/track/{TRACK_ID}")).is_none());
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let link = SpotifyLink::parse(&format!("  spotify:track:{TRACK_ID}\n")).unwrap();
        assert_eq!(link.id, TRACK_ID);
    }
}
