//! Response templates, one per intent.
//!
//! The first three interpolate the employee's record. The rest are
//! company-wide text and ignore it.

use crate::resolver::OnboardingRecord;

pub const AURORA_OVERVIEW: &str = "The Aurora Design System is Raspberry Coffee's next-generation component framework. It's built with React, TypeScript, and Storybook. The repo is at https://github.com/JieHan-eng/aurora-design-system. Your main tasks will include implementing component variants, maintaining design tokens, and running accessibility tests.";

pub const FIRST_DAY: &str = "Great question! On your first day, focus on:\n\n1. Setting up your development environment\n2. Introducing yourself in Slack channels\n3. Meeting with your manager and team\n4. Reviewing the project documentation\n5. Taking a small \"good first issue\" to get familiar with the workflow\n\nDon't worry about being productive right away - it's all about learning and getting comfortable!";

pub const CONTACT_ROUTING: &str = "For different questions, here's who to contact:\n\n• Technical issues: Your team lead or manager\n• IT/equipment: Peter Adams (IT Manager)\n• HR/benefits: Fatima Khan (People Ops)\n• General questions: Your onboarding buddy or #onboarding channel\n\nDon't hesitate to ask - everyone's here to help!";

pub const FIRST_WEEK: &str = "Your first week tasks include:\n\n• Complete IT security training\n• Set up your dev environment\n• Review existing components in Storybook\n• Attend the weekly design system sync\n• Pick up a starter issue from Jira\n• Have coffee chats with team members\n\nTake it one step at a time, and don't hesitate to ask for help!";

pub const COMPANY_VALUES: &str = "Raspberry Coffee's core values are:\n\n1. Simplicity is the Ultimate Sophistication\n2. Privacy is a Human Right\n3. Deeply Integrated, Not Merely Connected\n4. Craft in Every Detail\n\nThese values guide everything we do, from product design to how we work together as a team.";

/// Fallback listing the topics the assistant covers.
pub const HELP: &str = "That's a great question! I can help you with information about:\n\n• Your manager and team\n• Slack channels and GitHub repos\n• The Aurora Design System project\n• First week tasks and onboarding process\n• Company values and culture\n• Who to contact for different needs\n\nWhat specific aspect would you like to know more about?";

pub fn manager_contact(record: &OnboardingRecord) -> String {
    format!(
        "Your manager is {}, who leads the {}. You can reach them at {}. They'll be your main point of contact for questions about your role and day-to-day work.",
        record.role.manager, record.role.team, record.role.manager_email
    )
}

pub fn channels(record: &OnboardingRecord) -> String {
    format!(
        "You've been added to these Slack channels: {}. These are the key channels for your role and project. You can join additional channels anytime based on your interests!",
        record.channel_list()
    )
}

pub fn repositories(record: &OnboardingRecord) -> String {
    let repos = record
        .github
        .repos
        .iter()
        .map(|r| format!("{} ({})", r.name, r.url))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "You have access to these GitHub repositories:\n\n{repos}\n\nYou can find setup instructions and contributing guidelines in each repo's README file."
    )
}

pub fn project_detail(_record: &OnboardingRecord) -> String {
    AURORA_OVERVIEW.to_string()
}

pub fn first_day(_record: &OnboardingRecord) -> String {
    FIRST_DAY.to_string()
}

pub fn contact_routing(_record: &OnboardingRecord) -> String {
    CONTACT_ROUTING.to_string()
}

pub fn first_week(_record: &OnboardingRecord) -> String {
    FIRST_WEEK.to_string()
}

pub fn company_values(_record: &OnboardingRecord) -> String {
    COMPANY_VALUES.to_string()
}

pub fn help(_record: &OnboardingRecord) -> String {
    HELP.to_string()
}

/// Greeting posted as the first assistant turn after login.
pub fn welcome(employee_name: &str, record: &OnboardingRecord) -> String {
    format!(
        "Welcome {employee_name}! 🎉 You've been successfully onboarded to Raspberry Coffee.\n\nHere's what's been set up for you:\n\n• Slack channels: {}\n• GitHub repositories: {}\n• Manager: {}\n\nI'm here to help you with any questions about your onboarding, the company, your project, or your role. What would you like to know?",
        record.channel_list(),
        record.repo_names(),
        record.role.manager
    )
}
