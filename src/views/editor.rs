use tracing::info;

use crate::guard::Capabilities;
use crate::model::{Course, CourseId, Lesson, LessonId};
use crate::remote::{CourseDraft, LessonDraft};

use super::{Mount, ViewContext, ViewState, settle, settle_ack};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorMode {
    New,
    Edit(CourseId),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EditorData {
    /// `None` until a new course is first saved.
    pub course: Option<Course>,
    pub lessons: Vec<Lesson>,
}

/// Instructor authoring screen for one course and its lessons.
pub struct CourseEditorView {
    ctx: ViewContext,
    mount: Mount,
    pub mode: EditorMode,
    pub state: ViewState<EditorData>,
    pub notice: Option<String>,
}

impl CourseEditorView {
    pub fn new(ctx: ViewContext, mode: EditorMode) -> Self {
        let state = match mode {
            EditorMode::New => ViewState::Ready(EditorData::default()),
            EditorMode::Edit(_) => ViewState::Loading,
        };
        Self {
            ctx,
            mount: Mount::new(),
            mode,
            state,
            notice: None,
        }
    }

    pub fn mount(&self) -> &Mount {
        &self.mount
    }

    pub fn load(&mut self) {
        let EditorMode::Edit(id) = self.mode.clone() else {
            return;
        };
        self.state = ViewState::Loading;
        let outcome = self.fetch(&id);
        if !self.mount.is_mounted() {
            return;
        }
        self.state = ViewState::from_outcome(outcome);
    }

    pub fn retry(&mut self) {
        self.load();
    }

    fn fetch(&self, id: &CourseId) -> Result<EditorData, String> {
        let course = settle(self.ctx.client.get_course(id), "get course")?;
        let caps = Capabilities::for_course(self.ctx.identity().as_ref(), &course, false);
        if !caps.can_edit_course {
            return Err("You do not have permission to edit this course.".to_string());
        }
        let lessons = self.fetch_lessons(id)?;
        Ok(EditorData {
            course: Some(course),
            lessons,
        })
    }

    fn fetch_lessons(&self, id: &CourseId) -> Result<Vec<Lesson>, String> {
        let mut lessons = settle(self.ctx.client.list_lessons(id), "list lessons")?;
        lessons.sort_by_key(|l| l.order_index);
        Ok(lessons)
    }

    pub fn validate(draft: &CourseDraft) -> Vec<String> {
        let mut errors = Vec::new();
        if draft.title.trim().is_empty() {
            errors.push("Title is required.".to_string());
        }
        if !draft.price.is_finite() || draft.price < 0.0 {
            errors.push("Price cannot be negative.".to_string());
        }
        errors
    }

    /// Creates or updates the course. A new course switches the editor to
    /// edit mode so lessons can be added.
    pub fn save(&mut self, draft: &CourseDraft) -> bool {
        let errors = Self::validate(draft);
        if !errors.is_empty() {
            self.notice = Some(errors.join("\n"));
            return false;
        }
        let outcome = match &self.mode {
            EditorMode::New => settle(self.ctx.client.create_course(draft), "create course"),
            EditorMode::Edit(id) => {
                settle(self.ctx.client.update_course(id, draft), "update course")
            }
        };
        if !self.mount.is_mounted() {
            return false;
        }
        match outcome {
            Ok(course) => {
                info!(course = %course.id, "course saved");
                self.mode = EditorMode::Edit(course.id.clone());
                match self.state.data_mut() {
                    Some(data) => data.course = Some(course),
                    None => {
                        self.state = ViewState::Ready(EditorData {
                            course: Some(course),
                            lessons: Vec::new(),
                        })
                    }
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

    pub fn add_lesson(&mut self, draft: &LessonDraft) -> bool {
        let EditorMode::Edit(id) = self.mode.clone() else {
            self.notice = Some("Save the course before adding lessons.".to_string());
            return false;
        };
        if draft.title.trim().is_empty() {
            self.notice = Some("Lesson title is required.".to_string());
            return false;
        }
        let outcome = settle_ack(self.ctx.client.create_lesson(&id, draft), "create lesson");
        self.after_lesson_change(&id, outcome)
    }

    pub fn update_lesson(&mut self, lesson: &LessonId, draft: &LessonDraft) -> bool {
        let EditorMode::Edit(id) = self.mode.clone() else {
            return false;
        };
        if draft.title.trim().is_empty() {
            self.notice = Some("Lesson title is required.".to_string());
            return false;
        }
        let outcome = settle_ack(
            self.ctx.client.update_lesson(lesson, draft),
            "update lesson",
        );
        self.after_lesson_change(&id, outcome)
    }

    pub fn delete_lesson(&mut self, lesson: &LessonId) -> bool {
        let EditorMode::Edit(id) = self.mode.clone() else {
            return false;
        };
        let outcome = settle_ack(self.ctx.client.delete_lesson(lesson), "delete lesson");
        self.after_lesson_change(&id, outcome)
    }

    // Lesson edits re-fetch just the lesson list.
    fn after_lesson_change(&mut self, id: &CourseId, outcome: Result<(), String>) -> bool {
        if !self.mount.is_mounted() {
            return false;
        }
        if let Err(msg) = outcome {
            self.notice = Some(msg);
            return false;
        }
        self.notice = None;
        match self.fetch_lessons(id) {
            Ok(lessons) => {
                if let Some(data) = self.state.data_mut() {
                    data.lessons = lessons;
                }
            }
            Err(msg) => self.notice = Some(msg),
        }
        true
    }
}
