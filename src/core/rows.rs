//! Row view model for the result list.
//!
//! Every record becomes one [`RowView`] of fixed height; the terminal layer
//! only draws what is computed here.

use crate::core::University;
use url::Url;

/// Lines per row, including the separator.
pub const ROW_HEIGHT: u16 = 6;

/// Link lines that fit beside the country and code lines; the rest is clipped.
pub const VISIBLE_LINKS: usize = ROW_HEIGHT as usize - 3;

pub const ALPHA_TWO_CODE_LABEL: &str = "Alpha Two Code: ";
pub const WEB_PAGES_LABEL: &str = "Web pages:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub name: String,
    pub country: String,
    pub code: String,
    /// `None` when the record has no web pages; the area is not drawn at all.
    pub links: Option<LinksArea>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinksArea {
    pub label: &'static str,
    pub links: Vec<LinkView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkView {
    /// Exactly the text of the web page entry.
    pub text: String,
    /// Parsed target; `None` flags an entry that could not be parsed and is
    /// shown but cannot be activated.
    pub target: Option<Url>,
}

impl LinkView {
    pub fn is_activatable(&self) -> bool {
        self.target.is_some()
    }
}

impl RowView {
    pub fn from_university(university: &University) -> Self {
        Self {
            name: university.name.clone(),
            country: country_line(university),
            code: format!("{}{}", ALPHA_TWO_CODE_LABEL, university.alpha_two_code),
            links: links_area(&university.web_pages),
        }
    }

    pub fn link_count(&self) -> usize {
        self.links.as_ref().map_or(0, |area| area.links.len())
    }

    /// Plain-text rendering used by the one-shot print mode.
    pub fn to_text_lines(&self) -> Vec<String> {
        let mut lines = vec![self.name.clone(), self.country.clone(), self.code.clone()];
        if let Some(area) = &self.links {
            lines.push(area.label.to_string());
            for link in &area.links {
                if link.is_activatable() {
                    lines.push(format!("  {}", link.text));
                } else {
                    lines.push(format!("  {} (invalid link)", link.text));
                }
            }
        }
        lines
    }
}

/// Rebuild every row from scratch; rows are never diffed against a previous set.
pub fn render_rows(universities: &[University]) -> Vec<RowView> {
    universities.iter().map(RowView::from_university).collect()
}

pub fn country_line(university: &University) -> String {
    match &university.state_province {
        Some(state_province) => format!("{}, {}", university.country, state_province),
        None => university.country.clone(),
    }
}

fn links_area(web_pages: &[String]) -> Option<LinksArea> {
    if web_pages.is_empty() {
        return None;
    }

    let links = web_pages
        .iter()
        .map(|page| {
            let target = match Url::parse(page) {
                Ok(url) => Some(url),
                Err(e) => {
                    tracing::warn!("Skipping malformed web page link {:?}: {}", page, e);
                    None
                }
            };
            LinkView {
                text: page.clone(),
                target,
            }
        })
        .collect();

    Some(LinksArea {
        label: WEB_PAGES_LABEL,
        links,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn university(state_province: Option<&str>, web_pages: &[&str]) -> University {
        University {
            name: "Test Univ".to_string(),
            country: "USA".to_string(),
            state_province: state_province.map(str::to_string),
            alpha_two_code: "US".to_string(),
            domains: vec!["test.edu".to_string()],
            web_pages: web_pages.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_country_line_without_state_province() {
        assert_eq!(country_line(&university(None, &[])), "USA");
    }

    #[test]
    fn test_country_line_with_state_province() {
        assert_eq!(
            country_line(&university(Some("California"), &[])),
            "USA, California"
        );
    }

    #[test]
    fn test_code_line_has_label() {
        let row = RowView::from_university(&university(None, &[]));
        assert_eq!(row.code, "Alpha Two Code: US");
    }

    #[test]
    fn test_empty_web_pages_hide_links_area() {
        let row = RowView::from_university(&university(None, &[]));
        assert!(row.links.is_none());
        assert_eq!(row.link_count(), 0);
        assert_eq!(row.to_text_lines().len(), 3);
    }

    #[test]
    fn test_each_web_page_is_a_distinct_link() {
        let row = RowView::from_university(&university(
            None,
            &["http://test.edu", "https://www.test.edu/"],
        ));

        let area = row.links.as_ref().unwrap();
        assert_eq!(area.label, "Web pages:");
        assert_eq!(area.links.len(), 2);
        assert_eq!(area.links[0].text, "http://test.edu");
        assert_eq!(area.links[1].text, "https://www.test.edu/");
        assert!(area.links.iter().all(LinkView::is_activatable));
    }

    #[test]
    fn test_malformed_link_is_flagged_not_fatal() {
        let row = RowView::from_university(&university(None, &["not a url", "http://ok.edu"]));

        let area = row.links.unwrap();
        assert!(!area.links[0].is_activatable());
        assert_eq!(area.links[0].text, "not a url");
        assert!(area.links[1].is_activatable());
    }

    #[test]
    fn test_render_rows_one_per_record() {
        let records = vec![university(None, &[]), university(Some("Ohio"), &["http://a.edu"])];
        let rows = render_rows(&records);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].country, "USA, Ohio");
        assert_eq!(
            rows[1].to_text_lines(),
            vec![
                "Test Univ".to_string(),
                "USA, Ohio".to_string(),
                "Alpha Two Code: US".to_string(),
                "Web pages:".to_string(),
                "  http://a.edu".to_string(),
            ]
        );
    }
}
