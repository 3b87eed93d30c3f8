use super::{DEFAULT_LANG, Poi};
use crate::markdown::{escape_md_link, sanitize_heading};

pub fn format_places(places: &[Poi], lang: &str) -> String {
    if places.is_empty() {
        return "No featured places in the content pack.\n".to_string();
    }

    let mut output = String::from("# Featured Destinations\n\n");
    for poi in places {
        output.push_str(&format_place(poi, lang));
        output.push('\n');
    }
    output
}

fn format_place(poi: &Poi, lang: &str) -> String {
    let mut output = format!(
        "## {} ({})\n\n{}\n\n",
        sanitize_heading(poi.name.get(lang)),
        sanitize_heading(&poi.kind),
        poi.short_description.get(lang)
    );

    output.push_str(&format!("- **Location:** {}\n", poi.location));
    output.push_str(&format!(
        "- **Opening hours:** {}\n",
        poi.opening_hours.get(lang)
    ));
    if let Some(price) = &poi.price_from {
        output.push_str(&format!("- **Tickets from:** {price}\n"));
    }
    output.push_str(&format!(
        "- [Directions]({})\n",
        escape_md_link(&poi.directions_url())
    ));
    if let Some(booking) = &poi.booking_url {
        output.push_str(&format!("- [Book tickets]({})\n", escape_md_link(booking)));
    }
    if let Some(website) = &poi.website {
        output.push_str(&format!("- [Website]({})\n", escape_md_link(website)));
    }
    if let Some(image) = poi.display_image() {
        output.push_str(&format!(
            "- ![{}]({})\n",
            escape_md_link(poi.name.get(DEFAULT_LANG)),
            escape_md_link(image)
        ));
    }
    if !poi.tags.is_empty() {
        let tags: Vec<_> = poi.tags.iter().map(|t| format!("#{t}")).collect();
        output.push_str(&format!("\n{}\n", tags.join(" ")));
    }
    if poi.booking_url.is_some() {
        output.push_str("\n_Prices are estimates. We may earn a commission from booking links._\n");
    }
    output.push_str(&format!("\n> Share: {}\n", poi.share_text(lang).replace('\n', "\n> ")));
    output
}
