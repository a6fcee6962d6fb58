use crate::model::{Course, Identity, Role};

/// What the signed-in user may do with one course, derived once per view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub can_edit_course: bool,
    pub can_message: bool,
    pub has_access: bool,
}

impl Capabilities {
    pub fn for_course(identity: Option<&Identity>, course: &Course, enrolled: bool) -> Self {
        let Some(identity) = identity else {
            return Self::default();
        };
        let admin = identity.is(Role::Admin);
        let owner = owns_course(identity, course);
        Self {
            can_edit_course: admin || owner,
            can_message: !owner && course.instructor_id.is_some(),
            // The owning instructor always has access, enrolled or not.
            has_access: admin || owner || enrolled,
        }
    }
}

pub fn owns_course(identity: &Identity, course: &Course) -> bool {
    identity.is(Role::Instructor)
        && course
            .instructor_id
            .as_ref()
            .is_some_and(|owner| owner == &identity.id)
}
