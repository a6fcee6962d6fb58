use tracing::info;

use crate::model::{Course, CourseId, Enrollment};

use super::{Mount, ViewContext, ViewState, settle, settle_ack};

pub struct StudentDashboardView {
    ctx: ViewContext,
    mount: Mount,
    pub state: ViewState<Vec<Enrollment>>,
}

impl StudentDashboardView {
    pub fn new(ctx: ViewContext) -> Self {
        Self {
            ctx,
            mount: Mount::new(),
            state: ViewState::Loading,
        }
    }

    pub fn mount(&self) -> &Mount {
        &self.mount
    }

    pub fn load(&mut self) {
        self.state = ViewState::Loading;
        let outcome = settle(self.ctx.client.my_enrollments(), "list enrollments");
        if !self.mount.is_mounted() {
            return;
        }
        self.state = ViewState::from_outcome(outcome);
    }

    pub fn retry(&mut self) {
        self.load();
    }
}

/// The instructor's own courses.
pub struct InstructorDashboardView {
    ctx: ViewContext,
    mount: Mount,
    pub state: ViewState<Vec<Course>>,
    pub notice: Option<String>,
}

impl InstructorDashboardView {
    pub fn new(ctx: ViewContext) -> Self {
        Self {
            ctx,
            mount: Mount::new(),
            state: ViewState::Loading,
            notice: None,
        }
    }

    pub fn mount(&self) -> &Mount {
        &self.mount
    }

    pub fn load(&mut self) {
        self.state = ViewState::Loading;
        let outcome = settle(self.ctx.client.my_courses(), "list own courses");
        if !self.mount.is_mounted() {
            return;
        }
        self.state = ViewState::from_outcome(outcome);
    }

    pub fn retry(&mut self) {
        self.load();
    }

    /// Deletes a course and drops it from the loaded list once the server
    /// confirms.
    pub fn delete(&mut self, id: &CourseId) -> bool {
        let outcome = settle_ack(self.ctx.client.delete_course(id), "delete course");
        if !self.mount.is_mounted() {
            return false;
        }
        match outcome {
            Ok(()) => {
                info!(course = %id, "course deleted");
                if let Some(courses) = self.state.data_mut() {
                    courses.retain(|c| &c.id != id);
                }
                self.notice = None;
                true
            }
            Err(msg) => {
                self.notice = Some(msg);
                false
            }
        }
    }
}
