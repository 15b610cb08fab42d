use crate::api::models::Contact;
use crate::contacts::ContactDirectory;
use crate::ui::Terminal;

/// Renders the directory as lettered sections with `group.row` selectors.
pub fn render(directory: &ContactDirectory) -> String {
    let mut out = String::new();
    for group in 0..directory.group_count() {
        let title = directory.header_title(group).unwrap_or_default();
        out.push_str(&format!("[{}]\n", title));
        for row in 0..directory.item_count(group) {
            if let Some(entry) = directory.contact_at(group, row) {
                out.push_str(&format!("  {}.{}  {}\n", group, row, entry.label()));
            }
        }
    }
    out
}

/// Parses a `group.row` selector.
pub fn parse_selection(input: &str) -> Option<(usize, usize)> {
    let (group, row) = input.trim().split_once('.')?;
    Some((group.parse().ok()?, row.parse().ok()?))
}

/// Shows the list and waits for a pick. `None` when the user quits or input ends.
pub async fn pick(term: &mut Terminal, directory: &ContactDirectory) -> std::io::Result<Option<Contact>> {
    if directory.group_count() == 0 {
        println!("No contacts to show.");
        return Ok(None);
    }
    println!("{}", render(directory));
    loop {
        let Some(answer) = term.ask("Pick a contact (group.row), q to quit: ").await? else {
            return Ok(None);
        };
        if answer.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        match parse_selection(&answer).and_then(|(g, r)| directory.select(g, r)) {
            Some(contact) => return Ok(Some(contact)),
            None => println!("No contact with a phone number at {:?}.", answer),
        }
    }
}
