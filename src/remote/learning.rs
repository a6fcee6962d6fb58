//! Enrollment, progress and certificate calls.

use anyhow::Result;
use reqwest::Method;

use crate::model::{Certificate, CourseId, Enrollment, EnrollmentStatus, LessonId, Progress};

use super::{EnrollRequest, RemoteClient, ResourceResult};

impl RemoteClient {
    pub fn enroll(&self, course_id: &CourseId) -> Result<ResourceResult<Enrollment>> {
        self.send_json(
            Method::POST,
            "/enrollments",
            &EnrollRequest { course_id },
            "enroll",
        )
    }

    pub fn my_enrollments(&self) -> Result<ResourceResult<Vec<Enrollment>>> {
        self.get("/enrollments/mine", "list enrollments")
    }

    pub fn enrollment_status(
        &self,
        course_id: &CourseId,
    ) -> Result<ResourceResult<EnrollmentStatus>> {
        self.get(
            &format!("/enrollments/status/{}", course_id),
            "enrollment status",
        )
    }

    pub fn complete_lesson(&self, lesson: &LessonId) -> Result<ResourceResult<Progress>> {
        self.execute(
            self.request(
                Method::POST,
                &format!("/progress/lessons/{}/complete", lesson),
            ),
            "complete lesson",
        )
    }

    pub fn course_progress(&self, course_id: &CourseId) -> Result<ResourceResult<Progress>> {
        self.get(
            &format!("/progress/courses/{}", course_id),
            "course progress",
        )
    }

    pub fn certificate(&self, course_id: &CourseId) -> Result<ResourceResult<Certificate>> {
        self.get(
            &format!("/certificates/courses/{}", course_id),
            "certificate",
        )
    }
}
