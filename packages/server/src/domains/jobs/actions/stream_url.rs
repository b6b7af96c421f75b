//! Stream URL derivation.

use url::Url;

use crate::domains::jobs::models::JobDetails;

/// Root URL used by `Query.jobs` when no `streamRootUrl` is given.
pub const JOBS_STREAM_ROOT_URL: &str = "http://streams.livepeer.org";

/// Root URL used by the `VideoJob.live` / `VideoJob.url` field arguments.
///
/// Differs from [`JOBS_STREAM_ROOT_URL`]; both are part of the published schema.
pub const FIELD_STREAM_ROOT_URL: &str = "http://www.streambox.fr/playlists/x36xhzz/";

/// Playlist suffix appended to the stream id.
pub const PLAYLIST_EXTENSION: &str = ".m3u8";

#[derive(Debug, thiserror::Error)]
pub enum StreamUrlError {
    #[error("invalid stream root URL `{root}`: {source}")]
    InvalidRoot {
        root: String,
        #[source]
        source: url::ParseError,
    },

    #[error("cannot resolve stream `{stream}` against `{root}`: {source}")]
    InvalidStream {
        stream: String,
        root: String,
        #[source]
        source: url::ParseError,
    },
}

/// Playlist file name for a stream, relative to any root.
pub fn playlist_name(stream: &str) -> String {
    format!("{}{}", stream, PLAYLIST_EXTENSION)
}

/// Playable URL for `job`.
///
/// A non-empty `url` already on the job wins. Otherwise `<stream>.m3u8` is resolved
/// against `stream_root_url` as an RFC 3986 relative reference, so a root without a
/// trailing slash has its last path segment replaced.
pub fn resolve_url(job: &JobDetails, stream_root_url: &str) -> Result<String, StreamUrlError> {
    if let Some(url) = job.url.as_deref().filter(|url| !url.is_empty()) {
        return Ok(url.to_string());
    }

    let root = Url::parse(stream_root_url).map_err(|source| StreamUrlError::InvalidRoot {
        root: stream_root_url.to_string(),
        source,
    })?;

    let playlist = playlist_name(&job.stream);
    let url = root
        .join(&playlist)
        .map_err(|source| StreamUrlError::InvalidStream {
            stream: job.stream.clone(),
            root: stream_root_url.to_string(),
            source,
        })?;

    Ok(url.into())
}
