//! Demo content for a fresh install.

use tracing::info;

use super::errors::StoreResult;
use super::models::{
    Education, EducationInput, Experience, ExperienceInput, ProfileInput, Project, ProjectInput,
    Skill, SkillInput,
};
use super::portfolio::PortfolioStore;

fn opt(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn demo_profile() -> ProfileInput {
    ProfileInput {
        name: "Your Name".to_string(),
        title: "Full Stack Developer".to_string(),
        bio: "Passionate developer with expertise in modern web technologies. I love creating \
              beautiful, functional applications that make a difference."
            .to_string(),
        email: "your.email@example.com".to_string(),
        phone: opt("+1 (555) 123-4567"),
        location: opt("Your City, Country"),
        website: opt("https://yourwebsite.com"),
        linkedin: opt("https://linkedin.com/in/yourprofile"),
        github: opt("https://github.com/yourusername"),
        twitter: opt("https://twitter.com/yourusername"),
        avatar: None,
        resume: None,
    }
}

fn demo_projects() -> Vec<ProjectInput> {
    let project = |title: &str,
                   description: &str,
                   content: &str,
                   technologies: &[&str],
                   slug: &str,
                   live: &str,
                   featured: bool,
                   order: i32| ProjectInput {
        title: title.to_string(),
        description: description.to_string(),
        content: opt(content),
        image: None,
        technologies: technologies.iter().map(|t| t.to_string()).collect(),
        github_url: Some(format!("https://github.com/yourusername/{slug}")),
        live_url: opt(live),
        featured,
        order,
    };

    vec![
        project(
            "E-Commerce Platform",
            "A full-stack e-commerce solution with modern UI and secure payments",
            "Built with Next.js, TypeScript, and Stripe integration. Features include user \
             authentication, product management, shopping cart, and order processing.",
            &["Next.js", "TypeScript", "Stripe", "Prisma", "PostgreSQL"],
            "ecommerce-platform",
            "https://ecommerce-demo.com",
            true,
            1,
        ),
        project(
            "Task Management App",
            "Collaborative task management with real-time updates",
            "A responsive web application built with React and Node.js. Includes drag-and-drop \
             functionality, team collaboration features, and progress tracking.",
            &["React", "Node.js", "Socket.io", "MongoDB", "Express"],
            "task-manager",
            "https://taskmanager-demo.com",
            true,
            2,
        ),
        project(
            "Weather Dashboard",
            "Real-time weather information with beautiful visualizations",
            "A responsive weather dashboard that displays current conditions and forecasts. \
             Built with modern web technologies and integrated with weather APIs.",
            &["Vue.js", "Chart.js", "Weather API", "CSS3", "JavaScript"],
            "weather-dashboard",
            "https://weather-demo.com",
            false,
            3,
        ),
    ]
}

fn demo_experience() -> Vec<ExperienceInput> {
    vec![
        ExperienceInput {
            company: "Tech Company Inc.".to_string(),
            position: "Senior Full Stack Developer".to_string(),
            description: "Led development of multiple web applications and mentored junior \
                          developers. Implemented modern development practices and improved \
                          team productivity."
                .to_string(),
            start_date: "2022-01".to_string(),
            end_date: opt("2024-01"),
            current: false,
            location: opt("San Francisco, CA"),
            order: 1,
        },
        ExperienceInput {
            company: "StartupXYZ".to_string(),
            position: "Frontend Developer".to_string(),
            description: "Developed responsive web applications using React and modern \
                          JavaScript. Collaborated with design team to create intuitive user \
                          interfaces."
                .to_string(),
            start_date: "2020-06".to_string(),
            end_date: opt("2021-12"),
            current: false,
            location: opt("Remote"),
            order: 2,
        },
    ]
}

fn demo_education() -> Vec<EducationInput> {
    vec![EducationInput {
        institution: "University of Technology".to_string(),
        degree: "Bachelor of Science".to_string(),
        field: opt("Computer Science"),
        start_date: "2016-09".to_string(),
        end_date: opt("2020-05"),
        current: false,
        location: opt("Boston, MA"),
        gpa: opt("3.8/4.0"),
        order: 1,
    }]
}

fn demo_skills() -> Vec<SkillInput> {
    [
        ("JavaScript", "Programming Languages", 9),
        ("TypeScript", "Programming Languages", 8),
        ("React", "Frontend", 9),
        ("Next.js", "Frontend", 8),
        ("Node.js", "Backend", 8),
        ("Python", "Programming Languages", 7),
        ("PostgreSQL", "Database", 8),
        ("MongoDB", "Database", 7),
        ("Docker", "DevOps", 6),
        ("AWS", "Cloud", 6),
    ]
    .into_iter()
    .zip(1..)
    .map(|((name, category, level), order)| SkillInput {
        name: name.to_string(),
        category: category.to_string(),
        level,
        order,
    })
    .collect()
}

/// Load the demo portfolio into an empty store.
///
/// Returns `false` without touching anything if the store already has
/// content.
pub fn seed_demo(store: &PortfolioStore) -> StoreResult<bool> {
    if !store.is_empty()? {
        info!("record store already has content, skipping seed");
        return Ok(false);
    }

    store.upsert_profile(demo_profile())?;
    for input in demo_projects() {
        store.create::<Project>(input)?;
    }
    for input in demo_experience() {
        store.create::<Experience>(input)?;
    }
    for input in demo_education() {
        store.create::<Education>(input)?;
    }
    for input in demo_skills() {
        store.create::<Skill>(input)?;
    }

    info!("seeded demo portfolio");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_populates_empty_store() {
        let store = PortfolioStore::in_memory();
        assert!(seed_demo(&store).unwrap());

        let counts = store.counts().unwrap();
        assert_eq!(counts.projects, 3);
        assert_eq!(counts.experience, 2);
        assert_eq!(counts.education, 1);
        assert_eq!(counts.skills, 10);
        assert_eq!(counts.messages, 0);
        assert_eq!(store.profile().unwrap().unwrap().title, "Full Stack Developer");

        let skills = store.list::<Skill>().unwrap();
        assert_eq!(skills.first().unwrap().name, "JavaScript");
        assert_eq!(skills.last().unwrap().name, "AWS");
    }

    #[test]
    fn test_seed_is_noop_on_existing_content() {
        let store = PortfolioStore::in_memory();
        assert!(seed_demo(&store).unwrap());
        assert!(!seed_demo(&store).unwrap());
        assert_eq!(store.counts().unwrap().projects, 3);
    }
}
