//! Course and lesson calls, including instructor authoring.

use anyhow::Result;
use reqwest::Method;

use crate::model::{Course, CourseId, Lesson, LessonId};

use super::{CourseDraft, LessonDraft, RemoteClient, ResourceResult};

impl RemoteClient {
    pub fn list_courses(&self) -> Result<ResourceResult<Vec<Course>>> {
        self.get("/courses", "list courses")
    }

    pub fn get_course(&self, id: &CourseId) -> Result<ResourceResult<Course>> {
        self.get(&format!("/courses/{}", id), "get course")
    }

    /// Courses owned by the signed-in instructor.
    pub fn my_courses(&self) -> Result<ResourceResult<Vec<Course>>> {
        self.get("/courses/mine", "list own courses")
    }

    pub fn create_course(&self, draft: &CourseDraft) -> Result<ResourceResult<Course>> {
        self.send_json(Method::POST, "/courses", draft, "create course")
    }

    pub fn update_course(
        &self,
        id: &CourseId,
        draft: &CourseDraft,
    ) -> Result<ResourceResult<Course>> {
        self.send_json(
            Method::PUT,
            &format!("/courses/{}", id),
            draft,
            "update course",
        )
    }

    pub fn delete_course(&self, id: &CourseId) -> Result<ResourceResult<serde_json::Value>> {
        self.delete(&format!("/courses/{}", id), "delete course")
    }

    pub fn list_lessons(&self, course: &CourseId) -> Result<ResourceResult<Vec<Lesson>>> {
        self.get(&format!("/courses/{}/lessons", course), "list lessons")
    }

    pub fn get_lesson(&self, id: &LessonId) -> Result<ResourceResult<Lesson>> {
        self.get(&format!("/lessons/{}", id), "get lesson")
    }

    pub fn create_lesson(
        &self,
        course: &CourseId,
        draft: &LessonDraft,
    ) -> Result<ResourceResult<Lesson>> {
        self.send_json(
            Method::POST,
            &format!("/courses/{}/lessons", course),
            draft,
            "create lesson",
        )
    }

    pub fn update_lesson(
        &self,
        id: &LessonId,
        draft: &LessonDraft,
    ) -> Result<ResourceResult<Lesson>> {
        self.send_json(
            Method::PUT,
            &format!("/lessons/{}", id),
            draft,
            "update lesson",
        )
    }

    pub fn delete_lesson(&self, id: &LessonId) -> Result<ResourceResult<serde_json::Value>> {
        self.delete(&format!("/lessons/{}", id), "delete lesson")
    }
}
