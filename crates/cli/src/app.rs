//! Application context: one session store, one gate, and the seeded catalogs.

use std::sync::Arc;

use anyhow::{Context, bail};
use clap::Subcommand;

use learnhub_auth::{
    AccessGate, GateDecision, Menu, Principal, Role, RolePermissionTable, RouteTable, SessionSlot,
    SessionStore, UserDirectory,
};
use learnhub_catalog::{Course, CourseCatalog, Student, StudentFilter, StudentRoster, seed};
use learnhub_core::CourseId;
use learnhub_infra::{Notification, NotificationCenter};

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Sign in with an existing account
    Login { email: String, password: String },
    /// Create an account and sign in
    Register {
        email: String,
        password: String,
        name: String,

        /// Role of the new account (defaults to student)
        #[arg(long)]
        role: Option<Role>,
    },
    /// Sign out and remove the persisted session
    Logout,
    /// Show the signed-in principal
    Whoami,
    /// Edit the signed-in principal's name or email
    Profile {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,
    },
    /// Navigate to a view and show the gate's decision
    Open { path: String },
    /// Show the sidebar entries visible to the signed-in principal
    Menu,
    /// Explain the access decision for a view as JSON
    Explain { path: String },
    /// List the course catalog
    Courses,
    /// List students, optionally filtered
    Students {
        /// Case-insensitive match on name or email
        #[arg(short = 's', long, default_value = "")]
        search: String,

        /// all | active | inactive
        #[arg(long, default_value = "all")]
        status: StudentFilter,
    },
}

pub struct App<S> {
    session: SessionStore<S, Arc<NotificationCenter>>,
    notifications: Arc<NotificationCenter>,
    gate: AccessGate,
    routes: RouteTable,
    menu: Menu,
    courses: CourseCatalog,
    students: StudentRoster,
}

impl<S: SessionSlot> App<S> {
    pub fn new(slot: S) -> Self {
        let notifications = Arc::new(NotificationCenter::new());
        let table = Arc::new(RolePermissionTable::builtin());

        Self {
            session: SessionStore::new(slot, Arc::clone(&notifications), UserDirectory::demo()),
            notifications,
            gate: AccessGate::new(table),
            routes: RouteTable::dashboard(),
            menu: Menu::dashboard(),
            courses: CourseCatalog::new(seed::courses()),
            students: StudentRoster::new(seed::students()),
        }
    }

    /// Leave the loading state by reading the persisted session.
    pub fn restore(&mut self) -> Option<&Principal> {
        self.session.restore()
    }

    pub fn session(&self) -> &SessionStore<S, Arc<NotificationCenter>> {
        &self.session
    }

    /// Banners raised since the last call, oldest first.
    pub fn drain_notifications(&self) -> Vec<Notification> {
        self.notifications.drain()
    }

    /// Run one command and return what should be printed.
    pub fn run(&mut self, command: Command) -> anyhow::Result<String> {
        match command {
            Command::Login { email, password } => {
                let principal = self.session.login(&email, &password)?;
                Ok(format!("signed in as {}", describe_principal(&principal)))
            }
            Command::Register {
                email,
                password,
                name,
                role,
            } => {
                let principal = self.session.register(&email, &password, &name, role)?;
                Ok(format!("registered {}", describe_principal(&principal)))
            }
            Command::Logout => {
                self.session.logout()?;
                Ok("signed out".to_string())
            }
            Command::Whoami => Ok(match self.session.current() {
                Some(principal) => describe_principal(principal),
                None => "not signed in".to_string(),
            }),
            Command::Profile { name, email } => {
                let principal = self
                    .session
                    .update_profile(name.as_deref(), email.as_deref())?;
                Ok(format!("profile updated: {}", describe_principal(&principal)))
            }
            Command::Open { path } => Ok(self.open(&path)),
            Command::Menu => self.menu(),
            Command::Explain { path } => {
                let explanation = self
                    .gate
                    .explain(self.session.state(), &self.routes, &path)
                    .context("not signed in; nothing to explain")?;
                Ok(serde_json::to_string_pretty(&explanation)?)
            }
            Command::Courses => {
                self.require_view("/courses")?;
                Ok(self.course_list())
            }
            Command::Students { search, status } => {
                self.require_view("/students")?;
                Ok(student_list(&self.students.search(&search, status)))
            }
        }
    }

    fn open(&self, path: &str) -> String {
        match self.gate.navigate(self.session.state(), &self.routes, path) {
            GateDecision::Render => self.render(path),
            other => describe_decision(&other),
        }
    }

    /// Fail unless the gate renders `path` for the current session.
    fn require_view(&self, path: &str) -> anyhow::Result<()> {
        let decision = self.gate.navigate(self.session.state(), &self.routes, path);
        if !decision.is_render() {
            bail!("cannot open {path}: {}", describe_decision(&decision));
        }
        Ok(())
    }

    fn render(&self, path: &str) -> String {
        let resolved = self.routes.resolve(path);
        let mut out = format!("== {} ==\n", resolved.route.title);

        match resolved.route.pattern.as_str() {
            "/courses" => out.push_str(&self.course_list()),
            "/course/:id" => {
                let course = resolved
                    .param("id")
                    .and_then(|raw| raw.parse::<CourseId>().ok())
                    .and_then(|id| self.courses.get(id));
                match course {
                    Some(course) => out.push_str(&course_detail(&course)),
                    None => out.push_str("course not found\n"),
                }
            }
            "/students" => out.push_str(&student_list(&self.students.list())),
            _ => {}
        }

        out
    }

    fn menu(&self) -> anyhow::Result<String> {
        let principal = self.session.current().context("not signed in")?;
        let visible = self.menu.visible_for(self.gate.table(), principal);

        let mut out = String::new();
        for item in &visible.main {
            out.push_str(&format!("{:<16} {}\n", item.label, item.path));
        }
        if !visible.admin.is_empty() {
            out.push_str("-- admin --\n");
            for item in &visible.admin {
                out.push_str(&format!("{:<16} {}\n", item.label, item.path));
            }
        }
        Ok(out)
    }

    fn course_list(&self) -> String {
        self.courses
            .list()
            .iter()
            .map(|c| {
                format!(
                    "{:>3}  {:<34} {:<16} {:<12} {:>3}%\n",
                    c.id.get(),
                    c.title,
                    c.category,
                    c.level,
                    c.progress
                )
            })
            .collect()
    }
}

fn describe_principal(principal: &Principal) -> String {
    format!(
        "{} <{}> ({})",
        principal.display_name,
        principal.email,
        principal.role.label()
    )
}

fn describe_decision(decision: &GateDecision) -> String {
    match decision {
        GateDecision::Loading => "loading".to_string(),
        GateDecision::RedirectToLogin {
            login_path,
            return_to,
        } => format!("redirect to {login_path} (return to {return_to})"),
        GateDecision::Redirect { to } => format!("redirect to {to}"),
        GateDecision::Render => "render".to_string(),
    }
}

fn course_detail(course: &Course) -> String {
    let mut out = format!(
        "{}\n{}\n{} | {} | {} | {} students | rating {:.1}\n",
        course.title,
        course.description,
        course.category,
        course.level,
        course.duration,
        course.students,
        course.rating
    );
    out.push_str(&format!(
        "lessons: {}/{} completed ({}%)\n",
        course.completed_lessons(),
        course.lessons.len(),
        course.lesson_completion()
    ));
    for lesson in &course.lessons {
        let mark = if lesson.completed { "x" } else { " " };
        out.push_str(&format!("  [{mark}] {} ({})\n", lesson.title, lesson.duration));
    }
    out
}

fn student_list(students: &[Student]) -> String {
    if students.is_empty() {
        return "no students match\n".to_string();
    }
    students
        .iter()
        .map(|s| {
            format!(
                "{:>3}  {:<16} {:<28} {:>2} courses  {:<10} {:?}\n",
                s.id.get(),
                s.name,
                s.email,
                s.enrolled_courses,
                s.last_active,
                s.status
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use learnhub_auth::{MemorySlot, NotificationKind, SessionState};
    use learnhub_infra::FileSlot;

    fn signed_in(email: &str, password: &str) -> App<MemorySlot> {
        let mut app = App::new(MemorySlot::new());
        app.restore();
        app.run(Command::Login {
            email: email.into(),
            password: password.into(),
        })
        .unwrap();
        app
    }

    #[test]
    fn login_reports_principal_and_notifies() {
        let mut app = App::new(MemorySlot::new());
        app.restore();

        let out = app
            .run(Command::Login {
                email: "john.doe@example.com".into(),
                password: "password123".into(),
            })
            .unwrap();
        assert_eq!(out, "signed in as John Doe <john.doe@example.com> (instructor)");

        let banners = app.drain_notifications();
        assert_eq!(banners.len(), 1);
        assert_eq!(banners[0].kind, NotificationKind::Success);
        assert_eq!(banners[0].message, "Welcome back, John Doe!");
    }

    #[test]
    fn failed_login_is_an_error_with_banner() {
        let mut app = App::new(MemorySlot::new());
        app.restore();

        let err = app
            .run(Command::Login {
                email: "student@example.com".into(),
                password: "nope".into(),
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid password");
        assert_eq!(app.run(Command::Whoami).unwrap(), "not signed in");
        assert_eq!(app.drain_notifications()[0].kind, NotificationKind::Error);
    }

    #[test]
    fn open_redirects_signed_out_to_login() {
        let mut app = App::new(MemorySlot::new());
        app.restore();

        let out = app.run(Command::Open { path: "/courses".into() }).unwrap();
        assert_eq!(out, "redirect to /login (return to /courses)");

        let out = app.run(Command::Open { path: "/login".into() }).unwrap();
        assert_eq!(out, "== Login ==\n");
    }

    #[test]
    fn open_before_restore_is_loading() {
        let mut app = App::new(MemorySlot::new());
        let out = app.run(Command::Open { path: "/dashboard".into() }).unwrap();
        assert_eq!(out, "loading");
    }

    #[test]
    fn student_is_redirected_from_student_management() {
        let mut app = signed_in("student@example.com", "password123");

        let out = app.run(Command::Open { path: "/students".into() }).unwrap();
        assert_eq!(out, "redirect to /dashboard");

        let err = app
            .run(Command::Students {
                search: String::new(),
                status: StudentFilter::All,
            })
            .unwrap_err();
        assert!(err.to_string().contains("redirect to /dashboard"));
    }

    #[test]
    fn course_detail_renders_lessons() {
        let mut app = signed_in("student@example.com", "password123");

        let out = app.run(Command::Open { path: "/course/1".into() }).unwrap();
        assert!(out.starts_with("== Course ==\nPython Automation Fundamentals\n"));
        assert!(out.contains("lessons: 3/8 completed (37%)"));

        let out = app.run(Command::Open { path: "/course/99".into() }).unwrap();
        assert!(out.ends_with("course not found\n"));
    }

    #[test]
    fn courses_lists_catalog() {
        let mut app = signed_in("student@example.com", "password123");
        let out = app.run(Command::Courses).unwrap();
        assert_eq!(out.lines().count(), 6);
        assert!(out.contains("Database Automation"));
    }

    #[test]
    fn admin_can_search_students() {
        let mut app = signed_in("meistericham@gmail.com", "Sam1122334455!");

        let out = app
            .run(Command::Students {
                search: "EVA".into(),
                status: StudentFilter::All,
            })
            .unwrap();
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("eva.brown@example.com"));

        let out = app
            .run(Command::Students {
                search: "eva".into(),
                status: "inactive".parse().unwrap(),
            })
            .unwrap();
        assert_eq!(out, "no students match\n");
    }

    #[test]
    fn menu_hides_admin_section_from_students() {
        let mut app = signed_in("student@example.com", "password123");
        let out = app.run(Command::Menu).unwrap();
        assert!(out.contains("/courses"));
        assert!(!out.contains("/students"));
        assert!(!out.contains("-- admin --"));

        let mut app = signed_in("john.doe@example.com", "password123");
        let out = app.run(Command::Menu).unwrap();
        assert!(out.contains("/admin/upload"));
        assert!(!out.contains("/admin/content"));
    }

    #[test]
    fn explain_reports_missing_permission() {
        let mut app = signed_in("john.doe@example.com", "password123");
        let out = app.run(Command::Explain { path: "/students".into() }).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["granted"], false);
        assert_eq!(json["denial_reason"]["kind"], "missing_permission");

        app.run(Command::Logout).unwrap();
        assert!(app.run(Command::Explain { path: "/students".into() }).is_err());
    }

    #[test]
    fn profile_edit_is_visible_in_whoami() {
        let mut app = signed_in("student@example.com", "password123");
        app.run(Command::Profile {
            name: Some("Renamed".into()),
            email: None,
        })
        .unwrap();
        assert_eq!(
            app.run(Command::Whoami).unwrap(),
            "Renamed <student@example.com> (student)"
        );
    }

    #[test]
    fn session_survives_restart_through_file_slot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut first = App::new(FileSlot::new(&path));
        first.restore();
        first
            .run(Command::Register {
                email: "new@example.com".into(),
                password: "pw".into(),
                name: "New Person".into(),
                role: Some(Role::Instructor),
            })
            .unwrap();
        drop(first);

        let mut second = App::new(FileSlot::new(&path));
        assert!(second.restore().is_some());
        assert_eq!(
            second.run(Command::Whoami).unwrap(),
            "New Person <new@example.com> (instructor)"
        );

        second.run(Command::Logout).unwrap();
        let mut third = App::new(FileSlot::new(&path));
        assert!(third.restore().is_none());
        assert!(matches!(third.session().state(), SessionState::SignedOut));
    }
}
