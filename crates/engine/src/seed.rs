//! Fixture events used to populate a fresh database.

use chrono::NaiveDate;

use crate::commands::EventNew;

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// The six sample events, in insertion order.
pub fn sample_events() -> Vec<EventNew> {
    vec![
        EventNew::new("React Conference 2024", day(2024, 6, 15), "09:00 AM")
            .description(
                "Join industry leaders to learn about the latest React features and best practices",
            )
            .organizer("React Community")
            .location("San Francisco, CA")
            .capacity(500)
            .category("Conference")
            .tags(["React", "Web Development", "JavaScript"]),
        EventNew::new("Node.js Workshop", day(2024, 6, 20), "10:00 AM")
            .description("Hands-on workshop to build scalable backend applications with Node.js")
            .organizer("Node Academy")
            .location("New York, NY")
            .capacity(100)
            .category("Workshop")
            .tags(["Node.js", "Backend", "JavaScript"]),
        EventNew::new("Web Design Masterclass", day(2024, 6, 25), "02:00 PM")
            .description("Learn modern web design principles and UI/UX best practices")
            .organizer("Design Institute")
            .location("Los Angeles, CA")
            .capacity(150)
            .category("Masterclass")
            .tags(["Design", "UI/UX", "Web"]),
        EventNew::new("MongoDB Database Optimization", day(2024, 7, 1), "11:00 AM")
            .description("Advanced techniques for optimizing database queries and indexes")
            .organizer("Database Inc")
            .location("Austin, TX")
            .capacity(200)
            .category("Seminar")
            .tags(["Database", "Backend"]),
        EventNew::new("Full Stack Development Bootcamp", day(2024, 7, 10), "09:00 AM")
            .description("Intensive bootcamp covering frontend, backend, and database technologies")
            .organizer("Tech Academy")
            .location("Seattle, WA")
            .capacity(80)
            .category("Bootcamp")
            .tags(["Full Stack", "MERN", "Web Development"]),
        EventNew::new("AWS Cloud Computing Summit", day(2024, 7, 15), "08:30 AM")
            .description("Explore AWS services and cloud architecture for scalable applications")
            .organizer("AWS Community")
            .location("Boston, MA")
            .capacity(300)
            .category("Summit")
            .tags(["AWS", "Cloud", "DevOps"]),
    ]
}
