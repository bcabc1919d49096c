//! Download-script generation for fetched photos.

use api_client::MediaItem;
use chrono::Utc;
use std::path::Path;

/// Shell command that downloads one photo at full resolution.
pub fn download_command(photo: &MediaItem) -> String {
    format!("curl {} --output {}", photo.download_url(), photo.filename)
}

/// Joined download commands for all fetched photos, one per line, with a
/// short provenance header.
pub fn download_script(photos: &[MediaItem]) -> String {
    let mut lines = vec![
        "#!/bin/sh".to_string(),
        format!("# generated by photofetch at {}", Utc::now().to_rfc3339()),
    ];
    lines.extend(photos.iter().map(download_command));
    let mut script = lines.join("\n");
    script.push('\n');
    script
}

pub fn write_download_script(path: &Path, photos: &[MediaItem]) -> std::io::Result<()> {
    std::fs::write(path, download_script(photos))
}
