//! Demo records shown by a fresh dashboard.

use learnhub_auth::Role;
use learnhub_core::{CourseId, StudentId};

use crate::{Course, CourseLevel, Lesson, Student, StudentStatus};

#[allow(clippy::too_many_arguments)]
fn course(
    id: u64,
    title: &str,
    description: &str,
    category: &str,
    level: CourseLevel,
    duration: &str,
    students: u32,
    rating: f32,
    progress: u8,
    lessons: &[(&str, &str, bool)],
) -> Course {
    Course {
        id: CourseId::new(id),
        title: title.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        level,
        duration: duration.to_string(),
        students,
        rating,
        progress,
        lessons: lessons
            .iter()
            .map(|(title, duration, done)| Lesson::new(title, duration, *done))
            .collect(),
    }
}

pub fn courses() -> Vec<Course> {
    vec![
        course(
            1,
            "Python Automation Fundamentals",
            "Learn the basics of Python automation, from simple scripts to complex workflows.",
            "Programming",
            CourseLevel::Beginner,
            "4 weeks",
            234,
            4.8,
            85,
            &[
                ("Introduction to Python Automation", "15 min", true),
                ("Setting Up Your Environment", "20 min", true),
                ("Basic Python Scripts", "25 min", true),
                ("File Operations", "30 min", false),
                ("Web Automation", "35 min", false),
                ("Data Processing", "28 min", false),
                ("Error Handling", "22 min", false),
                ("Best Practices", "18 min", false),
            ],
        ),
        course(
            2,
            "Web Scraping Mastery",
            "Master web scraping techniques using Python and popular libraries.",
            "Data Collection",
            CourseLevel::Intermediate,
            "6 weeks",
            189,
            4.7,
            72,
            &[
                ("Web Scraping Basics", "20 min", true),
                ("Using BeautifulSoup", "25 min", true),
                ("Handling JavaScript", "30 min", false),
                ("Data Storage", "22 min", false),
                ("Advanced Techniques", "35 min", false),
                ("Legal Considerations", "15 min", false),
            ],
        ),
        course(
            3,
            "API Testing & Automation",
            "Comprehensive guide to API testing and automation strategies.",
            "Testing",
            CourseLevel::Intermediate,
            "5 weeks",
            156,
            4.9,
            94,
            &[
                ("API Testing Fundamentals", "18 min", true),
                ("REST API Testing", "25 min", true),
                ("Authentication Testing", "22 min", true),
                ("Performance Testing", "28 min", true),
                ("Automation Frameworks", "30 min", false),
            ],
        ),
        course(
            4,
            "CI/CD Pipeline Automation",
            "Build and manage continuous integration and deployment pipelines.",
            "DevOps",
            CourseLevel::Advanced,
            "8 weeks",
            123,
            4.6,
            68,
            &[
                ("CI/CD Concepts", "20 min", true),
                ("Setting Up Jenkins", "35 min", true),
                ("Docker Integration", "40 min", false),
                ("Testing Automation", "30 min", false),
                ("Deployment Strategies", "25 min", false),
                ("Monitoring & Alerting", "28 min", false),
            ],
        ),
        course(
            5,
            "Docker for Automation",
            "Containerize your automation scripts and workflows using Docker.",
            "DevOps",
            CourseLevel::Intermediate,
            "4 weeks",
            98,
            4.5,
            45,
            &[
                ("Docker Basics", "25 min", true),
                ("Creating Containers", "30 min", false),
                ("Docker Compose", "35 min", false),
                ("Automation Workflows", "40 min", false),
            ],
        ),
        course(
            6,
            "Database Automation",
            "Automate database operations, backups, and maintenance tasks.",
            "Database",
            CourseLevel::Advanced,
            "6 weeks",
            87,
            4.7,
            23,
            &[
                ("Database Automation Basics", "20 min", true),
                ("Backup Automation", "25 min", false),
                ("Data Migration", "30 min", false),
                ("Performance Monitoring", "28 min", false),
                ("Maintenance Scripts", "22 min", false),
            ],
        ),
    ]
}

fn student(
    id: u64,
    name: &str,
    email: &str,
    enrolled_courses: u32,
    last_active: &str,
    status: StudentStatus,
) -> Student {
    Student {
        id: StudentId::new(id),
        name: name.to_string(),
        email: email.to_string(),
        role: Role::Student,
        enrolled_courses,
        last_active: last_active.to_string(),
        status,
    }
}

pub fn students() -> Vec<Student> {
    use StudentStatus::{Active, Inactive};

    vec![
        student(1, "Alice Johnson", "alice.johnson@example.com", 3, "2 days ago", Active),
        student(2, "Bob Smith", "bob.smith@example.com", 2, "1 week ago", Active),
        student(3, "Carol Davis", "carol.davis@example.com", 5, "3 days ago", Active),
        student(4, "David Wilson", "david.wilson@example.com", 1, "1 day ago", Inactive),
        student(5, "Eva Brown", "eva.brown@example.com", 4, "Today", Active),
    ]
}
