// SPDX-License-Identifier: AGPL-3.0
// Course Browser Core - External media links

use crate::types::{AppError, Course};

/// Opens a URI outside the application
pub trait LinkLauncher {
    fn open_external(&self, url: &str) -> Result<(), AppError>;
}

/// Launcher backed by the desktop's default handler
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl LinkLauncher for SystemLauncher {
    fn open_external(&self, url: &str) -> Result<(), AppError> {
        open::that(url).map_err(|e| AppError::Launch(format!("{}: {}", url, e)))
    }
}

/// What happened when the user asked to watch a course video
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaOutcome {
    Opened,
    NoLink,
    Failed,
}

/// Open the course's media link. Failures are logged, never returned.
pub fn open_course_media(launcher: &dyn LinkLauncher, course: &Course) -> MediaOutcome {
    let Some(url) = course.video_url.as_deref().filter(|url| !url.trim().is_empty()) else {
        tracing::warn!("No video URL provided for course {}", course.id);
        return MediaOutcome::NoLink;
    };

    match launcher.open_external(url) {
        Ok(()) => {
            tracing::info!("Opened video for course {}", course.id);
            MediaOutcome::Opened
        }
        Err(e) => {
            tracing::error!("Failed to open URL for course {}: {}", course.id, e);
            MediaOutcome::Failed
        }
    }
}
