use crate::models::Attendee;

/// One summary line per attendee, in input order.
pub fn render_summaries(attendees: &[Attendee]) -> Vec<String> {
    attendees.iter().map(ToString::to_string).collect()
}

/// The labeled lines describing one attendee, without indentation:
/// `id`, name and city, company, email, phone.
pub fn detail_lines(attendee: &Attendee) -> [String; 5] {
    [
        format!("id {}:", attendee.id),
        format!(
            "{} {} from {}",
            attendee.first_name, attendee.last_name, attendee.city
        ),
        format!("Working at {},", attendee.company),
        format!("email: {},", attendee.email),
        format!("number: {}", attendee.phone),
    ]
}

/// Detail block with every line after the first indented by a tab.
pub fn render_details(attendee: &Attendee) -> String {
    detail_lines(attendee).join("\n\t")
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn ada() -> Attendee {
        Attendee {
            id: 3,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            city: "London".into(),
            company: "Analytical Engines".into(),
            email: "ada@ae.org".into(),
            phone: "1815".into(),
            date_added: NaiveDate::from_ymd_opt(1843, 7, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn details_use_the_labeled_layout() {
        assert_eq!(
            render_details(&ada()),
            "id 3:\n\tAda Lovelace from London\n\tWorking at Analytical Engines,\n\temail: ada@ae.org,\n\tnumber: 1815"
        );
    }

    #[test]
    fn summaries_follow_input_order() {
        let mut second = ada();
        second.id = 4;
        second.first_name = "Augusta".into();
        let lines = render_summaries(&[ada(), second]);
        assert_eq!(
            lines,
            vec![
                "Ada Lovelace from London working at Analytical Engines, id 3".to_string(),
                "Augusta Lovelace from London working at Analytical Engines, id 4".to_string(),
            ]
        );
    }
}
