//! Programs a lead can be interested in.
//!
//! A fixed sample catalog that backs the form's program selector.

pub const PROGRAMS: [&str; 4] = ["Desarrollo Web", "Marketing Digital", "Diseño UX/UI", "Data Science"];

pub fn programs() -> &'static [&'static str] {
    &PROGRAMS
}

pub fn is_known_program(name: &str) -> bool {
    PROGRAMS.contains(&name)
}
