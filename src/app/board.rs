use crate::domain::model::{RaffleInfo, Reservation, SlotView};

const COLUMNS: usize = 10;

/// 10x10 號碼盤，已預約的號碼顯示為 "--"
pub fn render_board(slots: &[SlotView]) -> String {
    let taken = slots.iter().filter(|s| s.reserved).count();
    let mut out = String::new();

    for row in slots.chunks(COLUMNS) {
        let cells: Vec<String> = row
            .iter()
            .map(|s| {
                if s.reserved {
                    "--".to_string()
                } else {
                    s.id.to_string()
                }
            })
            .collect();
        out.push_str(&cells.join(" "));
        out.push('\n');
    }

    out.push_str(&format!(
        "{} reserved, {} available\n",
        taken,
        slots.len() - taken
    ));
    out
}

pub fn render_available(slots: &[SlotView]) -> String {
    let available: Vec<String> = slots
        .iter()
        .filter(|s| !s.reserved)
        .map(|s| s.id.to_string())
        .collect();
    if available.is_empty() {
        "No numbers available\n".to_string()
    } else {
        format!("{}\n", available.join(" "))
    }
}

pub fn render_reservations(reservations: &[Reservation]) -> String {
    if reservations.is_empty() {
        return "No reservations yet\n".to_string();
    }

    let name_width = reservations
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Nombre".len());

    let mut out = format!("{:<6}  {:<name_width$}  {}\n", "Número", "Nombre", "Teléfono");
    for r in reservations {
        let padding = name_width - r.name.chars().count();
        out.push_str(&format!(
            "{:<6}  {}{}  {}\n",
            r.slot.to_string(),
            r.name,
            " ".repeat(padding),
            r.phone
        ));
    }
    out
}

pub fn render_info(info: &RaffleInfo) -> String {
    let mut out = format!(
        "{}\nSorteo: {} - {}\n\n{}\n",
        info.title, info.draw_date, info.draw_source, info.prize
    );
    for feature in &info.prize_features {
        out.push_str(&format!("  • {}\n", feature));
    }
    out
}
