const WATCH_URL: &str = "https://www.youtube.com/watch?v=";
const EMBED_URL: &str = "https://www.youtube.com/embed/";

/// Builds the video platform watch URL handed to the player for a video id
pub fn watch_url(video_id: &str) -> String {
    format!("{}{}", WATCH_URL, urlencoding::encode(video_id))
}

/// Builds the embeddable player URL used by the watch page iframe
pub fn embed_url(video_id: &str) -> String {
    format!("{}{}", EMBED_URL, urlencoding::encode(video_id))
}
