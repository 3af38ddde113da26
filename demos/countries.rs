//! Drags the fast scroll thumb down an alphabetical country list and prints
//! what a renderer would draw at each step.
//!
//! Run with `RUST_LOG=debug` to see the scroller's own logging. Pass
//! `--open-project` to also open the project page in a browser.

use std::process::Command;
use std::thread;
use std::time::{Duration, Instant};

use fastscroll::prelude::*;

const PROJECT_URL: &str = "https://github.com/jaredrummler/FastScroll-RecyclerView";

const COUNTRIES: &[&str] = &[
    "Afghanistan", "Albania", "Algeria", "Andorra", "Angola", "Argentina", "Armenia",
    "Australia", "Austria", "Azerbaijan", "Bahamas", "Bahrain", "Bangladesh", "Belarus",
    "Belgium", "Belize", "Benin", "Bhutan", "Bolivia", "Botswana", "Brazil", "Bulgaria",
    "Cambodia", "Cameroon", "Canada", "Chad", "Chile", "China", "Colombia", "Croatia", "Cuba",
    "Cyprus", "Denmark", "Djibouti", "Dominica", "Ecuador", "Egypt", "Eritrea", "Estonia",
    "Ethiopia", "Fiji", "Finland", "France", "Gabon", "Gambia", "Georgia", "Germany", "Ghana",
    "Greece", "Guatemala", "Guinea", "Haiti", "Honduras", "Hungary", "Iceland", "India",
    "Indonesia", "Iran", "Iraq", "Ireland", "Israel", "Italy", "Jamaica", "Japan", "Jordan",
    "Kazakhstan", "Kenya", "Kiribati", "Kuwait", "Laos", "Latvia", "Lebanon", "Lesotho",
    "Liberia", "Libya", "Lithuania", "Luxembourg", "Madagascar", "Malawi", "Malaysia",
    "Maldives", "Mali", "Malta", "Mexico", "Monaco", "Mongolia", "Morocco", "Namibia", "Nepal",
    "Netherlands", "Nicaragua", "Niger", "Nigeria", "Norway", "Oman", "Pakistan", "Panama",
    "Paraguay", "Peru", "Philippines", "Poland", "Portugal", "Qatar", "Romania", "Russia",
    "Rwanda", "Samoa", "Senegal", "Serbia", "Singapore", "Slovakia", "Slovenia", "Somalia",
    "Spain", "Sudan", "Sweden", "Switzerland", "Syria", "Taiwan", "Tanzania", "Thailand",
    "Togo", "Tonga", "Tunisia", "Turkey", "Uganda", "Ukraine", "Uruguay", "Uzbekistan",
    "Vanuatu", "Venezuela", "Vietnam", "Yemen", "Zambia", "Zimbabwe",
];

/// An in-memory list of fixed 48 px rows.
struct CountryList {
    geometry: ListGeometry,
    row_height: i32,
    scroll_px: i32,
}

impl CountryList {
    fn new() -> Self {
        Self {
            geometry: ListGeometry::new(360, 640).padding(Padding::symmetric(0, 8)),
            row_height: 48,
            scroll_px: 0,
        }
    }

    fn max_scroll(&self) -> i32 {
        let padding = self.geometry.padding;
        let content = padding.top + COUNTRIES.len() as i32 * self.row_height + padding.bottom;
        (content - self.geometry.height).max(0)
    }

    fn rows(&self) -> Vec<RowLayout> {
        let top = self.geometry.padding.top - self.scroll_px;
        COUNTRIES
            .iter()
            .enumerate()
            .map(|(position, _)| RowLayout::new(position, top + position as i32 * self.row_height, self.row_height))
            .filter(|row| row.decorated_bottom > 0 && row.decorated_top < self.geometry.height)
            .collect()
    }

    fn first_visible_name(&self) -> &'static str {
        self.first_visible_row()
            .map(|row| COUNTRIES[row.position])
            .unwrap_or("-")
    }
}

impl ListHost for CountryList {
    fn item_count(&self) -> usize {
        COUNTRIES.len()
    }

    fn geometry(&self) -> ListGeometry {
        self.geometry
    }

    fn first_visible_row(&self) -> Option<RowLayout> {
        self.rows().into_iter().next()
    }

    fn visible_rows(&self) -> Vec<RowLayout> {
        self.rows()
    }

    fn scroll_to_position_with_offset(&mut self, position: usize, offset: i32) {
        let target = position as i32 * self.row_height - offset;
        self.scroll_px = target.clamp(0, self.max_scroll());
    }

    fn stop_scroll(&mut self) {}

    fn section_name(&self, position: usize) -> Option<String> {
        COUNTRIES
            .get(position)
            .and_then(|name| name.chars().next())
            .map(|initial| initial.to_uppercase().collect())
    }
}

/// Prints draw calls instead of rasterizing them.
struct PrintCanvas;

impl Canvas for PrintCanvas {
    fn draw_rect(&mut self, rect: Rect, color: Color) {
        println!("  track  {rect:?} alpha {:.2}", color.a);
    }

    fn draw_path(&mut self, path: &ThumbPath, _color: Color) {
        println!("  thumb  top {:?} bottom {:?}", path.start, path.outer_bottom);
    }

    fn draw_rounded_rect(&mut self, rect: Rect, color: Color, radius: f32) {
        println!("  popup  {rect:?} radius {radius} alpha {:.2}", color.a);
    }

    fn draw_text(&mut self, text: &str, rect: Rect, _color: Color, font_size: f32) {
        println!("  label  {text:?} in {rect:?} at {font_size}px");
    }
}

/// Open `url` in the desktop browser. A missing opener is logged and ignored.
///
/// The opener runs detached: a background thread reaps it so the demo never
/// blocks on the browser and never leaves a zombie behind.
fn open_project_page(url: &str) {
    let mut child = match Command::new("xdg-open").arg(url).spawn() {
        Ok(child) => child,
        Err(e) => {
            log::warn!("no handler to open {url}: {e}");
            return;
        }
    };
    log::info!("opening {url} (pid {})", child.id());
    let url = url.to_owned();
    thread::spawn(move || match child.wait() {
        Ok(status) if !status.success() => log::warn!("opener for {url} exited with {status}"),
        Ok(_) => {}
        Err(e) => log::warn!("lost opener for {url}: {e}"),
    });
}

fn main() {
    env_logger::init();

    if std::env::args().any(|arg| arg == "--open-project") {
        open_project_page(PROJECT_URL);
    }

    let config = match FastScrollConfig::builder().density(2.0).curvature(true).build() {
        Ok(config) => config,
        Err(e) => {
            log::error!("invalid fast scroll config: {e}");
            return;
        }
    };
    let mut list = CountryList::new();
    let mut scroller = FastScroller::new(config);
    scroller.on_layout(&list);

    let frame = Duration::from_millis(16);
    let mut now = Instant::now();
    let thumb = scroller.thumb_offset();
    let x = (thumb.x + 4) as f32;
    let mut y = (thumb.y + 20) as f32;

    scroller.handle_touch(&mut list, TouchEvent::Down { x, y }, now);
    while y < list.geometry.height as f32 {
        y += 24.0;
        now += frame;
        scroller.handle_touch(&mut list, TouchEvent::Move { x, y }, now);
        scroller.tick(now);

        println!(
            "finger y {y:>5.0}: first row {:<12} thumb {:?}",
            list.first_visible_name(),
            scroller.thumb_offset()
        );
        scroller.draw(&mut PrintCanvas);
    }
    scroller.handle_touch(&mut list, TouchEvent::Up { x, y }, now);

    while scroller.tick(now) || scroller.is_hide_pending() {
        now += frame;
    }
    println!(
        "settled: thumb width {} popup alpha {:.2}",
        scroller.thumb().width(),
        scroller.popup().alpha()
    );
}
