use crate::components::color::Color;
use crate::platform::Frame;

/// Something that can append itself to a [`Frame`].
///
/// `draw_tinted` overrides the stored color for one draw without changing
/// it; `draw_alpha` is the common case of overriding only the alpha.
pub trait Drawable {
    fn is_visible(&self) -> bool;

    fn set_visible(&mut self, visible: bool);

    fn draw_tinted(&self, frame: &mut Frame, tint: Color);

    fn color(&self) -> Color;

    fn draw(&self, frame: &mut Frame) {
        self.draw_tinted(frame, self.color());
    }

    fn draw_alpha(&self, frame: &mut Frame, alpha: u8) {
        self.draw_tinted(frame, self.color().with_alpha(alpha));
    }
}
