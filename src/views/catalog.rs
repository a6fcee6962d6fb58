use tracing::{debug, warn};

use crate::guard::Capabilities;
use crate::model::{Course, CourseId, Lesson, Role};

use super::{Mount, ViewContext, ViewState, settle, settle_optional};

/// Empty-state copy for a course without lessons.
pub const NO_LESSONS: &str = "This course has no lessons yet.";

pub struct CourseListView {
    ctx: ViewContext,
    mount: Mount,
    pub state: ViewState<Vec<Course>>,
}

impl CourseListView {
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
        let outcome = settle(self.ctx.client.list_courses(), "list courses");
        if !self.mount.is_mounted() {
            return;
        }
        self.state = ViewState::from_outcome(outcome);
    }

    pub fn retry(&mut self) {
        self.load();
    }

    /// Courses whose title, category or description contain `query`,
    /// ignoring case. An empty query matches everything.
    pub fn filtered(&self, query: &str) -> Vec<&Course> {
        let Some(courses) = self.state.data() else {
            return Vec::new();
        };
        let needle = query.trim().to_lowercase();
        courses
            .iter()
            .filter(|c| {
                needle.is_empty()
                    || c.title.to_lowercase().contains(&needle)
                    || c.description.to_lowercase().contains(&needle)
                    || c
                        .category
                        .as_deref()
                        .is_some_and(|cat| cat.to_lowercase().contains(&needle))
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CourseDetail {
    pub course: Course,
    pub lessons: Vec<Lesson>,
    pub enrolled: bool,
    pub capabilities: Capabilities,
}

impl CourseDetail {
    pub fn empty_state(&self) -> Option<&'static str> {
        self.lessons.is_empty().then_some(NO_LESSONS)
    }
}

pub struct CourseDetailView {
    ctx: ViewContext,
    mount: Mount,
    course_id: CourseId,
    pub state: ViewState<CourseDetail>,
    pub notice: Option<String>,
}

impl CourseDetailView {
    pub fn new(ctx: ViewContext, course_id: CourseId) -> Self {
        Self {
            ctx,
            mount: Mount::new(),
            course_id,
            state: ViewState::Loading,
            notice: None,
        }
    }

    pub fn mount(&self) -> &Mount {
        &self.mount
    }

    pub fn course_id(&self) -> &CourseId {
        &self.course_id
    }

    pub fn load(&mut self) {
        self.state = ViewState::Loading;
        let outcome = self.fetch();
        if !self.mount.is_mounted() {
            return;
        }
        self.state = ViewState::from_outcome(outcome);
    }

    pub fn retry(&mut self) {
        self.load();
    }

    fn fetch(&self) -> Result<CourseDetail, String> {
        let client = &self.ctx.client;
        let course = settle(client.get_course(&self.course_id), "get course")?;
        let mut lessons = settle(client.list_lessons(&self.course_id), "list lessons")?;
        lessons.sort_by_key(|l| l.order_index);

        let identity = self.ctx.identity();
        let enrolled = match identity.as_ref() {
            Some(who) if who.is(Role::Student) => {
                match settle(
                    client.enrollment_status(&self.course_id),
                    "enrollment status",
                ) {
                    Ok(status) => status.is_enrolled,
                    Err(msg) => {
                        warn!(course = %self.course_id, %msg, "enrollment status unavailable");
                        false
                    }
                }
            }
            _ => false,
        };
        let capabilities = Capabilities::for_course(identity.as_ref(), &course, enrolled);
        Ok(CourseDetail {
            course,
            lessons,
            enrolled,
            capabilities,
        })
    }

    /// Enrolls the signed-in student. On success the loaded detail is
    /// patched in place; on failure the server's message becomes the
    /// notice and the loaded course stays as it was.
    pub fn enroll(&mut self) -> bool {
        let Some(identity) = self.ctx.identity() else {
            self.notice = Some("Sign in to enroll in this course.".to_string());
            return false;
        };
        let outcome = settle_optional(self.ctx.client.enroll(&self.course_id), "enroll");
        if !self.mount.is_mounted() {
            return false;
        }
        match outcome {
            Ok(enrollment) => {
                debug!(
                    course = %self.course_id,
                    enrollment = ?enrollment.map(|e| e.id),
                    "enrolled"
                );
                self.notice = None;
                if let Some(detail) = self.state.data_mut() {
                    detail.enrolled = true;
                    detail.capabilities =
                        Capabilities::for_course(Some(&identity), &detail.course, true);
                }
                true
            }
            Err(msg) => {
                self.notice = Some(msg);
                false
            }
        }
    }
}
