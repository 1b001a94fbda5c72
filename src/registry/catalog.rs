//! Built-in Raspberry Coffee catalog.

use super::model::{Catalog, GithubRepo, Project, Role};

const RASPBERRY_DOMAIN: &str = "raspberry-coffee.com";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn project(
    id: &str,
    name: &str,
    description: &str,
    repos: Vec<GithubRepo>,
    channels: &[&str],
    roles: &[&str],
) -> Project {
    Project {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        github_repos: repos,
        slack_channels: strings(channels),
        available_roles: strings(roles),
    }
}

fn role(
    title: &str,
    department: &str,
    team: &str,
    manager: &str,
    mailbox: &str,
    channels: &[&str],
    description: &str,
) -> Role {
    Role {
        title: title.into(),
        department: department.into(),
        team: team.into(),
        manager: manager.into(),
        manager_email: format!("{mailbox}@{RASPBERRY_DOMAIN}"),
        additional_channels: strings(channels),
        description: description.into(),
    }
}

/// The catalog compiled into the binary. Project order is the form order.
pub fn builtin_catalog() -> Catalog {
    let projects = vec![
        project(
            "aurora",
            "Aurora Design System",
            "Next-generation design and component framework",
            vec![GithubRepo::new(
                "aurora-design-system",
                "https://github.com/JieHan-eng/aurora-design-system",
            )],
            &["#design-system", "#onboarding", "#ux-team"],
            &["Design System Intern", "Frontend Engineer", "UX Designer"],
        ),
        project(
            "nova",
            "Project Nova",
            "Raspberry Handheld 4 & Bloom OS 4.0 development",
            vec![
                GithubRepo::new(
                    "raspberry-handheld-4",
                    "https://github.com/raspberry-coffee/handheld-4",
                ),
                GithubRepo::new("bloom-os", "https://github.com/raspberry-coffee/bloom-os"),
            ],
            &["#project-nova", "#onboarding", "#engineering"],
            &["Software Engineer", "Product Manager", "QA Engineer"],
        ),
        project(
            "customer360",
            "Customer 360",
            "Data platform for analytics and customer insights",
            vec![GithubRepo::new(
                "customer-360-platform",
                "https://github.com/raspberry-coffee/customer-360",
            )],
            &["#customer-360", "#onboarding", "#data-team"],
            &["Data Engineer", "Analytics Engineer", "ML Engineer"],
        ),
    ];

    let roles = vec![
        role(
            "Design System Intern",
            "Product",
            "UX Team",
            "Rania Boutros",
            "rania.boutros",
            &["#frontend"],
            "Implement component variants, maintain design tokens, run accessibility tests",
        ),
        role(
            "Frontend Engineer",
            "Engineering",
            "Application Engineering",
            "Priya Nair",
            "priya.nair",
            &["#frontend", "#engineering"],
            "Build and maintain frontend applications",
        ),
        role(
            "UX Designer",
            "Product",
            "UX Team",
            "Rania Boutros",
            "rania.boutros",
            &["#product"],
            "Design user interfaces and experiences",
        ),
        role(
            "Software Engineer",
            "Engineering",
            "Application Engineering",
            "Priya Nair",
            "priya.nair",
            &["#engineering", "#platform"],
            "Develop and maintain software systems",
        ),
        role(
            "Product Manager",
            "Product",
            "Product Management",
            "Lena Müller",
            "lena.mueller",
            &["#product", "#engineering"],
            "Define product strategy and roadmap",
        ),
        role(
            "QA Engineer",
            "Engineering",
            "Application Engineering",
            "Priya Nair",
            "priya.nair",
            &["#engineering", "#qa"],
            "Ensure quality through testing and automation",
        ),
        role(
            "Data Engineer",
            "Engineering",
            "Data & Analytics",
            "George Williams",
            "george.williams",
            &["#data-team", "#engineering"],
            "Build and maintain data pipelines",
        ),
        role(
            "Analytics Engineer",
            "Engineering",
            "Data & Analytics",
            "George Williams",
            "george.williams",
            &["#data-team"],
            "Transform data for business intelligence",
        ),
        role(
            "ML Engineer",
            "Engineering",
            "Data & Analytics",
            "George Williams",
            "george.williams",
            &["#data-team", "#ml"],
            "Develop machine learning models and systems",
        ),
    ];

    Catalog { projects, roles }
}
