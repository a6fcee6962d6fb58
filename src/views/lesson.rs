use tracing::debug;

use crate::model::{Certificate, Lesson, LessonId, Progress};

use super::{Mount, ViewContext, ViewState, settle, settle_optional};

#[derive(Clone, Debug, PartialEq)]
pub struct LessonPage {
    pub lesson: Lesson,
    /// Absent for users who do not track progress on this course.
    pub progress: Option<Progress>,
}

impl LessonPage {
    pub fn is_completed(&self) -> bool {
        self.progress
            .as_ref()
            .is_some_and(|p| p.is_completed(&self.lesson.id))
    }
}

pub struct LessonView {
    ctx: ViewContext,
    mount: Mount,
    lesson_id: LessonId,
    pub state: ViewState<LessonPage>,
    pub notice: Option<String>,
}

impl LessonView {
    pub fn new(ctx: ViewContext, lesson_id: LessonId) -> Self {
        Self {
            ctx,
            mount: Mount::new(),
            lesson_id,
            state: ViewState::Loading,
            notice: None,
        }
    }

    pub fn mount(&self) -> &Mount {
        &self.mount
    }

    pub fn load(&mut self) {
        self.state = ViewState::Loading;
        let client = &self.ctx.client;
        let outcome = settle(client.get_lesson(&self.lesson_id), "get lesson").map(|lesson| {
            let progress = settle(client.course_progress(&lesson.course_id), "course progress")
                .map_err(|msg| debug!(%msg, "no progress for lesson's course"))
                .ok();
            LessonPage { lesson, progress }
        });
        if !self.mount.is_mounted() {
            return;
        }
        self.state = ViewState::from_outcome(outcome);
    }

    pub fn retry(&mut self) {
        self.load();
    }

    pub fn mark_complete(&mut self) -> bool {
        let outcome = settle_optional(
            self.ctx.client.complete_lesson(&self.lesson_id),
            "complete lesson",
        );
        if !self.mount.is_mounted() {
            return false;
        }
        match outcome {
            Ok(progress) => {
                self.notice = None;
                let Some(page) = self.state.data_mut() else {
                    return true;
                };
                match progress {
                    Some(progress) => page.progress = Some(progress),
                    // No payload: mark the lesson done in what is already loaded.
                    None => {
                        if let Some(p) = page.progress.as_mut()
                            && !p.is_completed(&self.lesson_id)
                        {
                            p.completed_lesson_ids.push(self.lesson_id.clone());
                        }
                    }
                }
                true
            }
            Err(msg) => {
                self.notice = Some(msg);
                false
            }
        }
    }

    /// Fetches the course certificate once every lesson is complete.
    pub fn certificate(&mut self) -> Option<Certificate> {
        let page = self.state.data()?;
        let progress = page.progress.as_ref().filter(|p| p.is_course_complete());
        let Some(progress) = progress else {
            self.notice = Some("Complete every lesson to earn the certificate.".to_string());
            return None;
        };
        match settle(
            self.ctx.client.certificate(&progress.course_id),
            "certificate",
        ) {
            Ok(cert) => Some(cert),
            Err(msg) => {
                self.notice = Some(msg);
                None
            }
        }
    }
}
