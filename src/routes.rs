//! Route table: path parsing, access rules and role landing pages.

use crate::model::{CourseId, LessonId, Role};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Courses,
    CourseDetail(CourseId),
    Profile,
    Lesson(LessonId),
    Inbox,
    StudentDashboard,
    InstructorDashboard,
    NewCourse,
    EditCourse(CourseId),
    AdminUsers,
}

/// Who may see a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Any signed-in user.
    Session,
    /// Signed-in users holding one of these roles.
    Roles(&'static [Role]),
}

const STUDENT_ONLY: &[Role] = &[Role::Student];
const INSTRUCTOR_ONLY: &[Role] = &[Role::Instructor];
const ADMIN_ONLY: &[Role] = &[Role::Admin];

impl Route {
    /// Parses a path. Unmatched paths yield `None`; navigation treats them
    /// as a redirect home.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let route = match segments.as_slice() {
            [] => Self::Home,
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["courses"] => Self::Courses,
            ["courses", id] => Self::CourseDetail(CourseId::new(*id)),
            ["profile"] => Self::Profile,
            ["lessons", id] => Self::Lesson(LessonId::new(*id)),
            ["inbox"] => Self::Inbox,
            ["student", "dashboard"] => Self::StudentDashboard,
            ["instructor", "dashboard"] => Self::InstructorDashboard,
            ["instructor", "courses", "new"] => Self::NewCourse,
            ["instructor", "courses", id, "edit"] => Self::EditCourse(CourseId::new(*id)),
            ["admin", "users"] => Self::AdminUsers,
            _ => return None,
        };
        Some(route)
    }

    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::Courses => "/courses".to_string(),
            Self::CourseDetail(id) => format!("/courses/{}", id),
            Self::Profile => "/profile".to_string(),
            Self::Lesson(id) => format!("/lessons/{}", id),
            Self::Inbox => "/inbox".to_string(),
            Self::StudentDashboard => "/student/dashboard".to_string(),
            Self::InstructorDashboard => "/instructor/dashboard".to_string(),
            Self::NewCourse => "/instructor/courses/new".to_string(),
            Self::EditCourse(id) => format!("/instructor/courses/{}/edit", id),
            Self::AdminUsers => "/admin/users".to_string(),
        }
    }

    pub fn access(&self) -> Access {
        match self {
            Self::Home | Self::Login | Self::Register | Self::Courses | Self::CourseDetail(_) => {
                Access::Public
            }
            Self::Profile | Self::Lesson(_) | Self::Inbox => Access::Session,
            Self::StudentDashboard => Access::Roles(STUDENT_ONLY),
            Self::InstructorDashboard | Self::NewCourse | Self::EditCourse(_) => {
                Access::Roles(INSTRUCTOR_ONLY)
            }
            Self::AdminUsers => Access::Roles(ADMIN_ONLY),
        }
    }

    /// Where a user lands right after signing in.
    pub fn landing_for(role: Role) -> Self {
        match role {
            Role::Student => Self::StudentDashboard,
            Role::Instructor => Self::InstructorDashboard,
            Role::Admin => Self::AdminUsers,
        }
    }
}

#[cfg(test)]
#[path = "tests/routes_tests.rs"]
mod tests;
