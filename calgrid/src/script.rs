use anyhow::{Context, Result, bail};
use calendar_grid::{Action, CalendarDate, FocusMove, SelectionValue};

/// Parses one replayed action such as `click:2024-03-04` or `pageup`.
pub fn parse_action(text: &str) -> Result<Action> {
    let (name, argument) = match text.split_once(':') {
        Some((name, argument)) => (name, Some(argument)),
        None => (text, None),
    };
    let action = match (name.to_ascii_lowercase().as_str(), argument) {
        ("click", Some(date)) => Action::Click(parse_date(date)?),
        ("hover", Some(date)) => Action::Hover(parse_date(date)?),
        ("view", Some(date)) => Action::ResetView(parse_date(date)?),
        ("set", Some(value)) => Action::SetValue(
            value
                .parse::<SelectionValue>()
                .with_context(|| format!("invalid value in {text:?}"))?,
        ),
        ("leave", None) => Action::HoverEnd,
        ("left", None) => Action::MoveFocus(FocusMove::Left),
        ("right", None) => Action::MoveFocus(FocusMove::Right),
        ("up", None) => Action::MoveFocus(FocusMove::Up),
        ("down", None) => Action::MoveFocus(FocusMove::Down),
        ("pageup", None) => Action::MoveFocus(FocusMove::PageUp),
        ("pagedown", None) => Action::MoveFocus(FocusMove::PageDown),
        ("enter" | "space", None) => Action::Activate,
        ("next", None) => Action::ShowNextMonth,
        ("prev", None) => Action::ShowPreviousMonth,
        _ => bail!("unknown action {text:?}"),
    };
    Ok(action)
}

fn parse_date(text: &str) -> Result<CalendarDate> {
    text.parse()
        .with_context(|| format!("invalid date {text:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_actions() {
        let date = CalendarDate::new(2024, 3, 4).unwrap();
        assert_eq!(parse_action("click:2024-03-04").unwrap(), Action::Click(date));
        assert_eq!(parse_action("HOVER:2024-03-04").unwrap(), Action::Hover(date));
        assert_eq!(
            parse_action("pageup").unwrap(),
            Action::MoveFocus(FocusMove::PageUp)
        );
        assert_eq!(parse_action("space").unwrap(), Action::Activate);
        assert_eq!(
            parse_action("set:2024-03-09/2024-03-04").unwrap(),
            Action::SetValue(SelectionValue::range(
                date,
                CalendarDate::new(2024, 3, 9).unwrap()
            ))
        );
    }

    #[test]
    fn rejects_unknown_or_malformed_actions() {
        assert!(parse_action("click").is_err());
        assert!(parse_action("click:2024-02-30").is_err());
        assert!(parse_action("left:2024-03-04").is_err());
        assert!(parse_action("jump").is_err());
    }
}
