use clap::{Args, Subcommand, ValueEnum};

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Show or change client configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Sign in and store the session credential
    Login(LoginArgs),

    /// Create an account and sign in
    Register(RegisterArgs),

    /// Sign out (clear the stored credential)
    Logout,

    /// Show the signed-in identity
    Whoami(JsonArgs),

    /// Evaluate a route the way navigation would, then render it
    Open {
        /// Route path, e.g. /courses/12 or /instructor/dashboard
        path: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// List courses
    Courses {
        /// Only courses whose title, category or description match
        #[arg(long)]
        search: Option<String>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a course with its lessons
    Course {
        id: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Enroll in a course
    Enroll { course_id: String },

    /// Show a lesson
    Lesson {
        id: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark a lesson as completed
    Complete { lesson_id: String },

    /// Fetch the certificate of the course a lesson belongs to
    Certificate {
        lesson_id: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or edit the profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },

    /// Show the dashboard for the signed-in role
    Dashboard(JsonArgs),

    /// Course authoring (instructors)
    Instructor {
        #[command(subcommand)]
        command: InstructorCommands,
    },

    /// Show received messages
    Inbox(JsonArgs),

    /// Send a message
    Message(MessageArgs),

    /// User administration (administrators)
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
}

#[derive(Args)]
pub(crate) struct JsonArgs {
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Subcommand)]
pub(crate) enum ConfigCommands {
    /// Show the configuration
    Show(JsonArgs),
    /// Change the configuration
    Set {
        /// API base URL, e.g. https://learn.example.com/api
        #[arg(long)]
        url: Option<String>,
        /// Request timeout in seconds (0 clears it)
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
}

#[derive(Args)]
pub(crate) struct LoginArgs {
    #[arg(long)]
    pub(crate) email: String,
    #[arg(long, env = "LECTERN_PASSWORD", hide_env_values = true)]
    pub(crate) password: String,
}

#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum AccountKind {
    Student,
    Instructor,
}

#[derive(Args)]
pub(crate) struct RegisterArgs {
    /// Account type
    #[arg(long = "as", value_enum, default_value = "student")]
    pub(crate) kind: AccountKind,
    #[arg(long)]
    pub(crate) first_name: String,
    #[arg(long)]
    pub(crate) last_name: String,
    #[arg(long)]
    pub(crate) email: String,
    #[arg(long, env = "LECTERN_PASSWORD", hide_env_values = true)]
    pub(crate) password: String,
    /// Instructor bio
    #[arg(long)]
    pub(crate) bio: Option<String>,
    /// Instructor area of expertise
    #[arg(long)]
    pub(crate) expertise: Option<String>,
}

#[derive(Subcommand)]
pub(crate) enum ProfileCommands {
    /// Show the profile
    Show(JsonArgs),
    /// Update profile fields
    Update {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Change the password
    Password {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
    },
}

#[derive(Args)]
pub(crate) struct CourseFields {
    #[arg(long)]
    pub(crate) title: String,
    #[arg(long, default_value = "")]
    pub(crate) description: String,
    #[arg(long)]
    pub(crate) category: Option<String>,
    #[arg(long)]
    pub(crate) level: Option<String>,
    #[arg(long, default_value_t = 0.0)]
    pub(crate) price: f64,
    #[arg(long)]
    pub(crate) thumbnail_url: Option<String>,
}

#[derive(Args)]
pub(crate) struct LessonFields {
    #[arg(long)]
    pub(crate) title: String,
    #[arg(long, default_value = "")]
    pub(crate) content: String,
    #[arg(long)]
    pub(crate) video_url: Option<String>,
    #[arg(long, default_value_t = 0)]
    pub(crate) order: u32,
    #[arg(long)]
    pub(crate) duration_minutes: Option<u32>,
}

#[derive(Subcommand)]
pub(crate) enum InstructorCommands {
    /// List own courses
    Courses(JsonArgs),
    /// Create a course
    Create {
        #[command(flatten)]
        fields: CourseFields,
    },
    /// Edit a course
    Edit {
        id: String,
        #[command(flatten)]
        fields: CourseFields,
    },
    /// Delete a course
    Delete { id: String },
    /// Add a lesson to a course
    AddLesson {
        course_id: String,
        #[command(flatten)]
        fields: LessonFields,
    },
    /// Edit a lesson of a course
    EditLesson {
        course_id: String,
        lesson_id: String,
        #[command(flatten)]
        fields: LessonFields,
    },
    /// Delete a lesson from a course
    DeleteLesson { course_id: String, lesson_id: String },
}

#[derive(Args)]
pub(crate) struct MessageArgs {
    /// Recipient user id
    #[arg(long)]
    pub(crate) to: String,
    #[arg(long)]
    pub(crate) subject: String,
    #[arg(long)]
    pub(crate) body: String,
}

#[derive(Subcommand)]
pub(crate) enum AdminCommands {
    /// List users
    Users(JsonArgs),
    /// Ban a user
    Ban { user_id: String },
    /// Suspend a user until a date (YYYY-MM-DD)
    Suspend {
        user_id: String,
        #[arg(long)]
        until: String,
    },
    /// Lift a ban or suspension
    Reactivate { user_id: String },
}
