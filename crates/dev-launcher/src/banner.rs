//! Startup header and status banner.

use launcher_config_and_utils::Endpoints;
use project_layout::ProjectLayout;

/// Inner width of the boxed panels, in characters.
const BOX_WIDTH: usize = 68;

fn rule(left: char, right: char) -> String {
    format!("{}{}{}", left, "═".repeat(BOX_WIDTH), right)
}

fn row(text: &str) -> String {
    let pad = BOX_WIDTH.saturating_sub(text.chars().count());
    format!("║{}{}║", text, " ".repeat(pad))
}

fn centered(text: &str) -> String {
    let len = text.chars().count();
    let left = BOX_WIDTH.saturating_sub(len) / 2;
    row(&format!("{}{}", " ".repeat(left), text))
}

/// Header printed once the layout has been validated.
pub fn startup_header(layout: &ProjectLayout) -> Vec<String> {
    vec![
        String::new(),
        rule('╔', '╗'),
        row(""),
        centered("STARTING FRONTEND + BACKEND"),
        row(""),
        rule('╚', '╝'),
        String::new(),
        format!("Project root: {}", layout.root.display()),
        format!("Frontend:     {}", layout.frontend_dir.display()),
        format!("Backend:      {}", layout.backend_dir.display()),
        String::new(),
    ]
}

/// Status banner printed once, after the banner delay.
///
/// The URLs are informational; nothing checks that they respond.
pub fn status_banner(endpoints: &Endpoints, project_name: &str) -> Vec<String> {
    vec![
        String::new(),
        rule('╔', '╗'),
        centered("SERVICES RUNNING"),
        rule('╠', '╣'),
        row(""),
        row(&format!("  Frontend:  {}", endpoints.frontend)),
        row(&format!("  Backend:   {}", endpoints.backend)),
        row(&format!("  API docs:  {}", endpoints.docs)),
        row(&format!("  Health:    {}", endpoints.health)),
        row(""),
        rule('╠', '╣'),
        row("  To stop:   press Ctrl+C"),
        row(&format!("  Project:   {}", project_name)),
        row(""),
        rule('╚', '╝'),
        String::new(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn banner_lists_every_endpoint_and_project() {
        let lines = status_banner(&Endpoints::default(), "Portafolio Cristian Durán");
        let text = lines.join("\n");

        assert!(text.contains("http://localhost:3000"));
        assert!(text.contains("http://localhost:5000"));
        assert!(text.contains("http://localhost:5000/api/v1/docs"));
        assert!(text.contains("http://localhost:5000/api/v1/health"));
        assert!(text.contains("Ctrl+C"));
        assert!(text.contains("Portafolio Cristian Durán"));
    }

    #[test]
    fn boxed_rows_share_one_width() {
        let lines = status_banner(&Endpoints::default(), "Portafolio Cristian Durán");
        let widths: Vec<usize> = lines
            .iter()
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().count())
            .collect();
        assert!(widths.iter().all(|w| *w == BOX_WIDTH + 2));
    }

    #[test]
    fn long_rows_are_not_truncated() {
        let long = "x".repeat(BOX_WIDTH + 10);
        assert!(row(&long).contains(&long));
    }

    #[test]
    fn header_shows_resolved_paths() {
        let layout = ProjectLayout {
            root: PathBuf::from("/site"),
            frontend_dir: PathBuf::from("/site/frontend"),
            backend_dir: PathBuf::from("/site/backend"),
        };
        let text = startup_header(&layout).join("\n");
        assert!(text.contains("Project root: /site"));
        assert!(text.contains("/site/frontend"));
        assert!(text.contains("/site/backend"));
    }
}
