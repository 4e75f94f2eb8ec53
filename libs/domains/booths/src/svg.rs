//! Derived SVG view of a floor plan.
//!
//! Pure string rendering; the Booth Store supplies live statuses so the
//! output colors reflect current availability.

use crate::models::{Booth, BoothStatus, FloorPlan};
use std::collections::HashMap;
use uuid::Uuid;

fn fill_for(status: Option<BoothStatus>) -> &'static str {
    match status {
        Some(BoothStatus::Available) => "#8fce8f",
        Some(BoothStatus::Reserved) => "#f4d06f",
        Some(BoothStatus::Booked) => "#e2777a",
        Some(BoothStatus::Unavailable) => "#b0b0b0",
        None => "#e8e8e8",
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render the plan to a standalone SVG document
pub fn render_floor_plan(plan: &FloorPlan, booths: &[Booth]) -> String {
    let cell = plan.cell_size;
    let width = plan.grid_width * cell;
    let height = plan.grid_height * cell;

    let statuses: HashMap<Uuid, BoothStatus> =
        booths.iter().map(|b| (b.id, b.status)).collect();

    let mut svg = String::with_capacity(1024);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}">"#,
        width, height, width, height
    ));
    svg.push_str(&format!(
        r##"<rect x="0" y="0" width="{}" height="{}" fill="#fafafa" stroke="#cccccc"/>"##,
        width, height
    ));

    for placement in &plan.placements {
        let x = placement.x * cell;
        let y = placement.y * cell;
        let w = placement.width * cell;
        let h = placement.height * cell;
        let fill = fill_for(statuses.get(&placement.booth_id).copied());

        svg.push_str(&format!(
            r##"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" stroke="#555555" stroke-width="1"/>"##,
            x, y, w, h, fill
        ));
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" font-size="{}" text-anchor="middle" dominant-baseline="middle" font-family="sans-serif">{}</text>"#,
            x + w / 2,
            y + h / 2,
            cell / 3,
            escape(&placement.label)
        ));
    }

    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BoothPlacement, BoothSize};
    use chrono::Utc;

    fn plan_with_one_booth(booth_id: Uuid) -> FloorPlan {
        FloorPlan {
            id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            name: "Main hall".to_string(),
            grid_width: 10,
            grid_height: 8,
            cell_size: 40,
            placements: vec![BoothPlacement {
                booth_id,
                label: "A-01".to_string(),
                x: 1,
                y: 1,
                width: 2,
                height: 2,
            }],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn booth(id: Uuid, status: BoothStatus) -> Booth {
        Booth {
            id,
            event_id: Uuid::new_v4(),
            number: "A-01".to_string(),
            size: BoothSize::Standard,
            price_cents: 50_000,
            status,
            position_x: 1,
            position_y: 1,
            width: 2,
            height: 2,
            description: String::new(),
            amenities: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn renders_booth_with_status_color() {
        let booth_id = Uuid::new_v4();
        let svg = render_floor_plan(
            &plan_with_one_booth(booth_id),
            &[booth(booth_id, BoothStatus::Booked)],
        );

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("#e2777a"));
        assert!(svg.contains("A-01"));
    }

    #[test]
    fn unknown_booth_gets_placeholder_fill() {
        let svg = render_floor_plan(&plan_with_one_booth(Uuid::new_v4()), &[]);
        assert!(svg.contains("#e8e8e8"));
    }

    #[test]
    fn labels_are_escaped() {
        let booth_id = Uuid::new_v4();
        let mut plan = plan_with_one_booth(booth_id);
        plan.placements[0].label = "A<1> & co".to_string();

        let svg = render_floor_plan(&plan, &[]);
        assert!(svg.contains("A&lt;1&gt; &amp; co"));
        assert!(!svg.contains("A<1>"));
    }
}
