//! Server-rendered HTML for the portfolio and admin pages.
//!
//! Every interpolated value goes through [`escape_html`].

use serde::Serialize;

use crate::edge_config::{FeatureFlags, SiteConfig};
use crate::store::{
    ContactMessage, Education, Experience, Profile, Project, Skill, StoreCounts,
};
use crate::util::{escape_html, format_date_range, slugify, truncate_text};

/// Featured projects shown on the home page
pub const FEATURED_PROJECTS: usize = 3;
/// Experience entries shown on the home page
pub const RECENT_EXPERIENCE: usize = 3;
/// Education entries shown on the home page
pub const RECENT_EDUCATION: usize = 2;

/// Everything the home page shows, already in display order
pub struct PortfolioView {
    pub profile: Profile,
    pub projects: Vec<Project>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
}

impl PortfolioView {
    /// Apply the home page selection: featured projects and the first
    /// few experience and education entries
    pub fn new(
        profile: Profile,
        projects: Vec<Project>,
        experience: Vec<Experience>,
        education: Vec<Education>,
        skills: Vec<Skill>,
    ) -> Self {
        Self {
            profile,
            projects: projects
                .into_iter()
                .filter(|p| p.featured)
                .take(FEATURED_PROJECTS)
                .collect(),
            experience: experience.into_iter().take(RECENT_EXPERIENCE).collect(),
            education: education.into_iter().take(RECENT_EDUCATION).collect(),
            skills,
        }
    }

    /// Skills grouped by category, categories in first-seen order
    pub fn skill_categories(&self) -> Vec<(&str, Vec<&Skill>)> {
        let mut groups: Vec<(&str, Vec<&Skill>)> = Vec::new();
        for skill in &self.skills {
            match groups.iter_mut().find(|(c, _)| *c == skill.category) {
                Some((_, list)) => list.push(skill),
                None => groups.push((skill.category.as_str(), vec![skill])),
            }
        }
        groups
    }
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        body
    )
}

fn link(href: &str, label: &str) -> String {
    format!(
        "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
        escape_html(href),
        escape_html(label)
    )
}

// ==================
// Public site
// ==================

pub fn portfolio_page(view: &PortfolioView) -> String {
    let p = &view.profile;
    let mut body = String::new();

    body.push_str(&format!(
        "<nav><strong>{}</strong> <a href=\"#about\">About</a> <a href=\"#projects\">Projects</a> \
         <a href=\"#experience\">Experience</a> <a href=\"#contact\">Contact</a> \
         <a href=\"/admin\">Admin</a></nav>\n",
        escape_html(&p.name)
    ));

    body.push_str(&format!(
        "<header><h1>Hi, I'm {}</h1><p class=\"title\">{}</p><p>{}</p>",
        escape_html(&p.name),
        escape_html(&p.title),
        escape_html(&p.bio)
    ));
    if let Some(resume) = &p.resume {
        body.push_str(&link(resume, "Download Resume"));
    }
    body.push_str("</header>\n");

    body.push_str(&format!(
        "<section id=\"about\"><h2>About Me</h2><p>{}</p></section>\n",
        escape_html(&p.bio)
    ));

    body.push_str("<section id=\"skills\"><h2>Skills &amp; Technologies</h2>\n");
    for (category, skills) in view.skill_categories() {
        body.push_str(&format!(
            "<div class=\"skill-category\" id=\"skills-{}\"><h3>{}</h3><ul>",
            slugify(category),
            escape_html(category)
        ));
        for skill in skills {
            body.push_str(&format!(
                "<li>{} <span class=\"level\">{}/10</span></li>",
                escape_html(&skill.name),
                skill.level
            ));
        }
        body.push_str("</ul></div>\n");
    }
    body.push_str("</section>\n");

    body.push_str("<section id=\"projects\"><h2>Featured Projects</h2>\n");
    for project in &view.projects {
        body.push_str(&format!(
            "<article class=\"project\"><h3>{}</h3><p>{}</p>",
            escape_html(&project.title),
            escape_html(&project.description)
        ));
        if !project.technologies.is_empty() {
            let tags: Vec<String> = project
                .technologies
                .iter()
                .map(|t| format!("<span class=\"tech\">{}</span>", escape_html(t)))
                .collect();
            body.push_str(&format!("<div class=\"technologies\">{}</div>", tags.join(" ")));
        }
        if let Some(url) = &project.github_url {
            body.push_str(&link(url, "Code"));
        }
        if let Some(url) = &project.live_url {
            body.push_str(&link(url, "Live Demo"));
        }
        body.push_str("</article>\n");
    }
    body.push_str("</section>\n");

    body.push_str("<section id=\"experience\"><h2>Experience</h2>\n");
    for exp in &view.experience {
        body.push_str(&format!(
            "<article class=\"experience\"><h3>{}</h3><p class=\"company\">{}</p>\
             <p class=\"dates\">{}</p><p>{}</p></article>\n",
            escape_html(&exp.position),
            escape_html(&exp.company),
            escape_html(&format_date_range(&exp.start_date, exp.end_date.as_deref())),
            escape_html(&exp.description)
        ));
    }
    body.push_str("</section>\n");

    body.push_str("<section id=\"education\"><h2>Education</h2>\n");
    for edu in &view.education {
        let degree = match &edu.field {
            Some(field) => format!("{} in {}", edu.degree, field),
            None => edu.degree.clone(),
        };
        body.push_str(&format!(
            "<article class=\"education\"><h3>{}</h3><p class=\"institution\">{}</p>\
             <p class=\"dates\">{}</p></article>\n",
            escape_html(&degree),
            escape_html(&edu.institution),
            escape_html(&format_date_range(&edu.start_date, edu.end_date.as_deref()))
        ));
    }
    body.push_str("</section>\n");

    body.push_str(&format!(
        "<section id=\"contact\"><h2>Get In Touch</h2><p><a href=\"mailto:{0}\">{0}</a></p>",
        escape_html(&p.email)
    ));
    if let Some(location) = &p.location {
        body.push_str(&format!("<p class=\"location\">{}</p>", escape_html(location)));
    }
    for (label, url) in [
        ("GitHub", &p.github),
        ("LinkedIn", &p.linkedin),
        ("Twitter", &p.twitter),
        ("Website", &p.website),
    ] {
        if let Some(url) = url {
            body.push_str(&link(url, label));
        }
    }
    body.push_str("</section>\n");

    layout(&format!("{} - {}", p.name, p.title), &body)
}

pub fn portfolio_not_found_page() -> String {
    layout(
        "Portfolio Not Found",
        "<main><h1>Portfolio Not Found</h1>\
         <p>Please set up your profile in the admin panel.</p></main>",
    )
}

// ==================
// Admin panel
// ==================

/// Admin sections, in navigation order
pub const ADMIN_SECTIONS: [(&str, &str); 6] = [
    ("profile", "Profile"),
    ("projects", "Projects"),
    ("experience", "Experience"),
    ("education", "Education"),
    ("skills", "Skills"),
    ("messages", "Messages"),
];

fn admin_layout(title: &str, content: &str) -> String {
    let nav: Vec<String> = ADMIN_SECTIONS
        .iter()
        .map(|(slug, label)| format!("<a href=\"/admin/{}\">{}</a>", slug, label))
        .collect();
    let body = format!(
        "<nav><a href=\"/admin\">Dashboard</a> {} <a href=\"/\" target=\"_blank\">View Site</a></nav>\n\
         <main><h1>{}</h1>\n{}</main>",
        nav.join(" "),
        escape_html(title),
        content
    );
    layout(&format!("{} - Admin", title), &body)
}

pub fn dashboard_page(counts: &StoreCounts) -> String {
    let stats = [
        ("Projects", "projects", counts.projects),
        ("Experience", "experience", counts.experience),
        ("Education", "education", counts.education),
        ("Skills", "skills", counts.skills),
        ("Messages", "messages", counts.messages),
    ];

    let mut content = String::from("<div class=\"stats\">\n");
    for (title, slug, count) in stats {
        content.push_str(&format!(
            "<a class=\"stat\" href=\"/admin/{}\"><span class=\"label\">{}</span> \
             <span class=\"count\">{}</span></a>\n",
            slug, title, count
        ));
    }
    content.push_str("</div>\n");
    content.push_str(&format!(
        "<p class=\"unread\">{} unread message(s)</p>",
        counts.unread_messages
    ));

    admin_layout("Dashboard", &content)
}

fn table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    if rows.is_empty() {
        return "<p class=\"empty\">Nothing here yet.</p>".to_string();
    }
    let head: Vec<String> = headers.iter().map(|h| format!("<th>{}</th>", h)).collect();
    let mut out = format!("<table>\n<tr>{}</tr>\n", head.concat());
    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .map(|c| format!("<td>{}</td>", escape_html(c)))
            .collect();
        out.push_str(&format!("<tr>{}</tr>\n", cells.concat()));
    }
    out.push_str("</table>");
    out
}

/// Rows of one admin section, ready to render
pub enum SectionRows {
    Profile(Option<Profile>),
    Projects(Vec<Project>),
    Experience(Vec<Experience>),
    Education(Vec<Education>),
    Skills(Vec<Skill>),
    Messages(Vec<ContactMessage>),
}

pub fn section_page(title: &str, rows: &SectionRows) -> String {
    let content = match rows {
        SectionRows::Profile(None) => "<p class=\"empty\">No profile yet.</p>".to_string(),
        SectionRows::Profile(Some(p)) => table(
            &["Name", "Title", "Email", "Location"],
            vec![vec![
                p.name.clone(),
                p.title.clone(),
                p.email.clone(),
                p.location.clone().unwrap_or_default(),
            ]],
        ),
        SectionRows::Projects(items) => table(
            &["Order", "Title", "Featured", "Technologies"],
            items
                .iter()
                .map(|p| {
                    vec![
                        p.order.to_string(),
                        p.title.clone(),
                        if p.featured { "yes" } else { "no" }.to_string(),
                        p.technologies.join(", "),
                    ]
                })
                .collect(),
        ),
        SectionRows::Experience(items) => table(
            &["Order", "Position", "Company", "Dates"],
            items
                .iter()
                .map(|e| {
                    vec![
                        e.order.to_string(),
                        e.position.clone(),
                        e.company.clone(),
                        format_date_range(&e.start_date, e.end_date.as_deref()),
                    ]
                })
                .collect(),
        ),
        SectionRows::Education(items) => table(
            &["Order", "Degree", "Institution", "Dates"],
            items
                .iter()
                .map(|e| {
                    vec![
                        e.order.to_string(),
                        e.degree.clone(),
                        e.institution.clone(),
                        format_date_range(&e.start_date, e.end_date.as_deref()),
                    ]
                })
                .collect(),
        ),
        SectionRows::Skills(items) => table(
            &["Order", "Name", "Category", "Level"],
            items
                .iter()
                .map(|s| {
                    vec![
                        s.order.to_string(),
                        s.name.clone(),
                        s.category.clone(),
                        format!("{}/10", s.level),
                    ]
                })
                .collect(),
        ),
        SectionRows::Messages(items) => table(
            &["Received", "From", "Subject", "Message", "Status"],
            items
                .iter()
                .map(|m| {
                    vec![
                        m.created_at.format("%Y-%m-%d %H:%M").to_string(),
                        format!("{} <{}>", m.name, m.email),
                        m.subject.clone().unwrap_or_default(),
                        truncate_text(&m.message, 80),
                        if m.read { "read" } else { "unread" }.to_string(),
                    ]
                })
                .collect(),
        ),
    };

    admin_layout(title, &content)
}

// ==================
// Remote config
// ==================

fn pretty_json<T: Serialize>(value: Option<&T>) -> String {
    value
        .and_then(|v| serde_json::to_string_pretty(v).ok())
        .unwrap_or_else(|| "null".to_string())
}

/// Current remote config values; a key that could not be read shows as `null`
pub fn welcome_page(site: Option<&SiteConfig>, flags: Option<&FeatureFlags>) -> String {
    let body = format!(
        "<main class=\"welcome\">\n<h1>Welcome to Edge Config!</h1>\n\
         <section><h2>Dynamic Configuration</h2>\n\
         <h3>Site Config:</h3>\n<pre>{}</pre>\n\
         <h3>Feature Flags:</h3>\n<pre>{}</pre>\n</section>\n\
         <section><h2>How to use</h2>\n<ul>\n\
         <li>Update <code>siteConfig</code> to change the site title and description.</li>\n\
         <li>Toggle <code>featureFlags</code> to enable new features.</li>\n\
         <li>Set <code>maintenanceMode</code> to true to take the site offline.</li>\n\
         </ul></section>\n<a href=\"/\">Back to Portfolio</a>\n</main>",
        escape_html(&pretty_json(site)),
        escape_html(&pretty_json(flags))
    );
    layout("Edge Config", &body)
}

pub fn message_page(title: &str, message: &str) -> String {
    layout(
        title,
        &format!(
            "<main><h1>{}</h1><p>{}</p></main>",
            escape_html(title),
            escape_html(message)
        ),
    )
}
