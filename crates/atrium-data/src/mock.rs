//! Static datasets bundled with the binary.

use atrium_core::calendar::{CalendarEvent, EventCategory};
use atrium_core::Record;
use chrono::NaiveDate;

// (id, name, email, age, phone, access)
type TeamRow = (i64, &'static str, &'static str, i64, &'static str, &'static str);

const TEAM: &[TeamRow] = &[
    (1, "Jon Snow", "jonsnow@gmail.com", 35, "(665)121-5454", "admin"),
    (2, "Cersei Lannister", "cerseilannister@gmail.com", 42, "(421)314-2288", "manager"),
    (3, "Jaime Lannister", "jaimelannister@gmail.com", 45, "(422)982-6739", "user"),
    (4, "Anya Stark", "anyastark@gmail.com", 16, "(921)425-6742", "admin"),
    (5, "Daenerys Targaryen", "daenerystargaryen@gmail.com", 31, "(421)445-1189", "user"),
    (6, "Ever Melisandre", "evermelisandre@gmail.com", 150, "(232)545-6483", "manager"),
    (7, "Ferrara Clifford", "ferraraclifford@gmail.com", 44, "(543)124-0123", "user"),
    (8, "Rossini Frances", "rossinifrances@gmail.com", 36, "(222)444-5555", "user"),
    (9, "Harvey Roxie", "harveyroxie@gmail.com", 65, "(444)555-6239", "admin"),
];

// (id, registrar_id, name, email, age, phone, address, city, zip_code)
type ContactRow = (
    i64,
    i64,
    &'static str,
    &'static str,
    i64,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
);

const CONTACTS: &[ContactRow] = &[
    (1, 123512, "Jon Snow", "jonsnow@gmail.com", 35, "(665)121-5454", "0912 Won Street, Alabama, SY 10001", "New York", "10001"),
    (2, 123512, "Cersei Lannister", "cerseilannister@gmail.com", 42, "(421)314-2288", "1234 Main Street, New York, NY 10001", "New York", "13151"),
    (3, 4132513, "Jaime Lannister", "jaimelannister@gmail.com", 45, "(422)982-6739", "3333 Want Blvd, Estanza, NAY 42125", "New York", "87281"),
    (4, 123512, "Anya Stark", "anyastark@gmail.com", 16, "(921)425-6742", "1514 Main Street, New York, NY 22298", "New York", "15551"),
    (5, 123512, "Daenerys Targaryen", "daenerystargaryen@gmail.com", 31, "(421)445-1189", "11122 Welping Ave, Tenting, CD 21321", "Tenting", "14215"),
    (6, 123512, "Ever Melisandre", "evermelisandre@gmail.com", 150, "(232)545-6483", "1234 Canvile Street, Esvazark, NY 10001", "Esvazark", "10001"),
    (7, 123512, "Ferrara Clifford", "ferraraclifford@gmail.com", 44, "(543)124-0123", "22215 Super Street, Everting, ZO 515234", "Evertin", "51523"),
    (8, 123512, "Rossini Frances", "rossinifrances@gmail.com", 36, "(222)444-5555", "4123 Ever Blvd, Wentington, AD 142213", "Esteras", "44215"),
    (9, 123512, "Harvey Roxie", "harveyroxie@gmail.com", 65, "(444)555-6239", "51234 Avery Street, Cantory, ND 212412", "Colunza", "111234"),
    (10, 123512, "Enteri Redack", "enteriredack@gmail.com", 42, "(222)444-5555", "4123 Easer Blvd, Wentington, AD 142213", "Esteras", "44215"),
    (11, 123512, "Steve Goodman", "stevegoodmane@gmail.com", 11, "(444)555-6239", "51234 Fiveton Street, CunFory, ND 212412", "Colunza", "1234"),
];

// (question, answer, category)
const FAQ: &[(&str, &str, &str)] = &[
    (
        "How can I create an account?",
        "To create an account, click the Sign Up button on the top right and fill out the form with your details.",
        "Account",
    ),
    (
        "How do I reset my password?",
        "Click on 'Forgot Password' on the login page and follow the instructions to reset your password.",
        "Account",
    ),
    (
        "How do I create a new project?",
        "Navigate to the Projects section and click 'Add New Project'. Fill in the required fields and save.",
        "Project",
    ),
    (
        "Can I collaborate with others?",
        "Yes, you can invite team members to your projects via email and manage their permissions.",
        "Collaboration",
    ),
    (
        "Is my data secure?",
        "All your data is encrypted and securely stored. We use industry-standard security practices.",
        "Security",
    ),
];

// (id, name, phone, email, cost)
const INVOICES: &[(i64, &str, &str, &str, f64)] = &[
    (1, "Jon Snow", "(665)121-5454", "jonsnow@gmail.com", 21.24),
    (2, "Cersei Lannister", "(421)314-2288", "cerseilannister@gmail.com", 1.24),
    (3, "Jaime Lannister", "(422)982-6739", "jaimelannister@gmail.com", 11.24),
    (4, "Anya Stark", "(921)425-6742", "anyastark@gmail.com", 80.55),
    (5, "Daenerys Targaryen", "(421)445-1189", "daenerystargaryen@gmail.com", 1.24),
    (6, "Ever Melisandre", "(232)545-6483", "evermelisandre@gmail.com", 63.12),
    (7, "Ferrara Clifford", "(543)124-0123", "ferraraclifford@gmail.com", 52.42),
    (8, "Rossini Frances", "(222)444-5555", "rossinifrances@gmail.com", 21.24),
];

pub fn team() -> Vec<Record> {
    TEAM.iter()
        .map(|&(id, name, email, age, phone, access)| {
            Record::new()
                .with("id", id)
                .with("name", name)
                .with("email", email)
                .with("age", age)
                .with("phone", phone)
                .with("access", access)
        })
        .collect()
}

pub fn contacts() -> Vec<Record> {
    CONTACTS
        .iter()
        .map(|&(id, registrar_id, name, email, age, phone, address, city, zip_code)| {
            Record::new()
                .with("id", id)
                .with("registrar_id", registrar_id)
                .with("name", name)
                .with("age", age)
                .with("phone", phone)
                .with("email", email)
                .with("address", address)
                .with("city", city)
                .with("zip_code", zip_code)
        })
        .collect()
}

pub fn faq() -> Vec<Record> {
    FAQ.iter()
        .map(|&(question, answer, category)| {
            Record::new()
                .with("question", question)
                .with("answer", answer)
                .with("category", category)
        })
        .collect()
}

pub fn invoices() -> Vec<Record> {
    INVOICES
        .iter()
        .map(|&(id, name, phone, email, cost)| {
            Record::new()
                .with("id", id)
                .with("name", name)
                .with("phone", phone)
                .with("email", email)
                .with("cost", cost)
        })
        .collect()
}

/// The two events a fresh calendar starts with.
pub fn calendar_events() -> Vec<CalendarEvent> {
    let seed = [
        ("1", "All-day Meeting", (2022, 9, 14), EventCategory::Meeting),
        ("2", "Task Review", (2022, 9, 28), EventCategory::Task),
    ];
    seed.into_iter()
        .filter_map(|(id, title, (y, m, d), category)| {
            Some(CalendarEvent {
                id: id.to_string(),
                title: title.to_string(),
                date: NaiveDate::from_ymd_opt(y, m, d)?,
                category,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datasets_are_populated() {
        assert_eq!(team().len(), TEAM.len());
        assert_eq!(contacts().len(), CONTACTS.len());
        assert_eq!(faq().len(), 5);
        assert_eq!(calendar_events().len(), 2);
    }

    #[test]
    fn ids_are_unique() {
        let ids: std::collections::HashSet<_> = contacts().iter().filter_map(|r| r.text("id")).collect();
        assert_eq!(ids.len(), CONTACTS.len());
    }
}
