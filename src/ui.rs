//! HUD compass helpers

use crate::model::compass::normalize_degrees;

// -Z is north, +X is east; heading grows when turning left
const CARDINALS: [&str; 8] = ["N", "NW", "W", "SW", "S", "SE", "E", "NE"];

/// CSS transform for the compass rose
pub fn compass_transform(heading: f32) -> String {
    format!("rotate({heading}deg)")
}

/// Nearest of the eight compass points for an (unwrapped) heading
pub fn cardinal_label(heading: f32) -> &'static str {
    let sector = (normalize_degrees(heading) / 45.0).round() as usize % CARDINALS.len();
    CARDINALS[sector]
}

#[cfg(target_arch = "wasm32")]
pub use web::CompassRose;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsCast;
    use web_sys::HtmlElement;

    use super::compass_transform;

    /// The `.compass-rose` element, if the page has one
    pub struct CompassRose {
        element: Option<HtmlElement>,
    }

    impl CompassRose {
        pub fn find() -> Self {
            let element = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.query_selector(".compass-rose").ok().flatten())
                .and_then(|e| e.dyn_into::<HtmlElement>().ok());
            if element.is_none() {
                tracing::debug!("no .compass-rose element, compass display disabled");
            }
            Self { element }
        }

        /// Rotate the rose; does nothing without an element
        pub fn show(&self, heading: f32) {
            if let Some(el) = &self.element {
                if let Err(err) = el.style().set_property("transform", &compass_transform(heading)) {
                    tracing::debug!(?err, "failed to rotate compass rose");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_keeps_unwrapped_value() {
        assert_eq!(compass_transform(361.0), "rotate(361deg)");
        assert_eq!(compass_transform(-12.5), "rotate(-12.5deg)");
    }

    #[test]
    fn cardinal_points() {
        assert_eq!(cardinal_label(0.0), "N");
        assert_eq!(cardinal_label(90.0), "W");
        assert_eq!(cardinal_label(180.0), "S");
        assert_eq!(cardinal_label(270.0), "E");
        assert_eq!(cardinal_label(44.0), "NW");
        assert_eq!(cardinal_label(359.0), "N");
        assert_eq!(cardinal_label(361.0), "N");
        assert_eq!(cardinal_label(-90.0), "E");
    }
}
