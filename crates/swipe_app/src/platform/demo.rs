use chrono::{TimeZone, Utc};
use swipe_core::{JobListing, MatchScore};

struct DemoJob {
    id: &'static str,
    title: &'static str,
    company: &'static str,
    location: &'static str,
    posted: (i32, u32, u32),
    salary_range: &'static str,
    skills: [&'static str; 5],
    match_score: i64,
    description: &'static str,
}

const DEMO_JOBS: [DemoJob; 5] = [
    DemoJob {
        id: "1",
        title: "Senior Full Stack Developer",
        company: "TechCorp",
        location: "Bengaluru, India",
        posted: (2025, 10, 26),
        salary_range: "₹25L - ₹35L",
        skills: ["React", "Node.js", "TypeScript", "AWS", "MongoDB"],
        match_score: 95,
        description: "We're looking for an experienced full stack developer to join our growing team. You'll work on cutting-edge projects using modern technologies.",
    },
    DemoJob {
        id: "2",
        title: "Product Designer",
        company: "DesignHub",
        location: "Remote (India)",
        posted: (2025, 10, 23),
        salary_range: "₹18L - ₹25L",
        skills: ["Figma", "UI/UX", "Design Systems", "Prototyping", "User Research"],
        match_score: 88,
        description: "Join our design team to create beautiful, user-centered experiences for millions of users worldwide.",
    },
    DemoJob {
        id: "3",
        title: "DevOps Engineer",
        company: "CloudScale",
        location: "Hyderabad, India",
        posted: (2025, 10, 19),
        salary_range: "₹22L - ₹30L",
        skills: ["Kubernetes", "Docker", "CI/CD", "AWS", "Terraform"],
        match_score: 82,
        description: "Help us build and maintain scalable infrastructure for our rapidly growing platform.",
    },
    DemoJob {
        id: "4",
        title: "Data Scientist",
        company: "DataMinds",
        location: "Mumbai, India",
        posted: (2025, 10, 25),
        salary_range: "₹28L - ₹40L",
        skills: ["Python", "Machine Learning", "TensorFlow", "SQL", "Data Visualization"],
        match_score: 90,
        description: "Work with cutting-edge ML models to solve complex business problems and drive insights.",
    },
    DemoJob {
        id: "5",
        title: "Mobile Developer",
        company: "AppWorks",
        location: "Pune, India",
        posted: (2025, 10, 27),
        salary_range: "₹15L - ₹22L",
        skills: ["React Native", "iOS", "Android", "Swift", "Kotlin"],
        match_score: 85,
        description: "Build beautiful, performant mobile applications used by millions of users.",
    },
];

/// Built-in listings served by `--demo`.
pub fn listings() -> Vec<JobListing> {
    DEMO_JOBS
        .iter()
        .map(|job| {
            let (year, month, day) = job.posted;
            let mut listing = JobListing::new(job.id, job.title, job.company);
            listing.location = job.location.to_string();
            listing.salary_range = job.salary_range.to_string();
            listing.job_type = "Full-time".to_string();
            listing.skills = job.skills.iter().map(|s| s.to_string()).collect();
            listing.match_score = MatchScore::new(job.match_score);
            listing.posted_date = Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).single();
            listing.description = job.description.to_string();
            listing
        })
        .collect()
}
