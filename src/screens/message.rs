//! One-line message screen shown between runs ("GAME OVER", "Level
//! complete"...). Built on the fly by the dispatcher; any "play" input
//! leaves it.

use crate::components::anchor::Anchorage;
use crate::components::drawable::Drawable;
use crate::components::movable::Movable;
use crate::components::rect::Point;
use crate::components::sprite::Sprite;
use crate::game::{
    BACKGROUND_COLOR, GAME_NAME, GameContext, GameError, TIP_COLOR, TIP_TEXT, TITLE_COLOR,
};
use crate::platform::Frame;
use crate::resources::assets::FontId;
use crate::screens::{Screen, ScreenId, from_events};

pub struct MessageScreen {
    text: String,
    next: ScreenId,
    title: Sprite,
    tip: Sprite,
}

impl MessageScreen {
    /// An empty `text` shows the game name.
    pub fn new(text: &str, next: ScreenId) -> Self {
        let text = if text.is_empty() { GAME_NAME } else { text };
        Self {
            text: text.to_string(),
            next,
            title: Sprite::new(),
            tip: Sprite::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Screen for MessageScreen {
    fn initialize(&mut self, ctx: &mut GameContext) -> Result<(), GameError> {
        let center = ctx.window_center();
        let platform = ctx.platform.as_ref();
        self.title = Sprite::text(platform, FontId::Title, &self.text, TITLE_COLOR);
        self.title
            .set_position_anchored(center.x, center.y - 10, Anchorage::SOUTH);
        self.tip = Sprite::text(platform, FontId::Tip, TIP_TEXT, TIP_COLOR);
        self.tip
            .set_position_anchored(center.x, center.y + 10, Anchorage::NORTH);
        Ok(())
    }

    fn reset(&mut self, ctx: &mut GameContext) -> ScreenId {
        let center = ctx.window_center();
        ctx.user_info
            .reset(Point::new(center.x, center.y / 2), Anchorage::CENTER);
        ScreenId::Current
    }

    fn do_events(&mut self, ctx: &mut GameContext) -> ScreenId {
        from_events(ctx, self.next)
    }

    fn do_drawings(&mut self, ctx: &mut GameContext) -> ScreenId {
        let mut frame = Frame::new();
        frame.clear(BACKGROUND_COLOR);
        self.title.draw(&mut frame);
        self.tip.draw(&mut frame);
        ctx.present(&mut frame);
        ScreenId::Current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::input::{InputEvent, Key};
    use crate::platform::DrawCmd;
    use crate::platform::headless::HeadlessPlatform;
    use crate::resources::gameconfig::GameConfig;

    #[test]
    fn test_message_is_drawn_until_play() {
        let platform = HeadlessPlatform::new(640, 480, [])
            .idle(3)
            .then([InputEvent::KeyUp(Key::Space)]);
        let probe = platform.probe();
        let mut ctx = GameContext::new(Box::new(platform), GameConfig::new());
        let mut screen = MessageScreen::new("GAME OVER", ScreenId::Play);
        screen.initialize(&mut ctx).unwrap();
        assert_eq!(screen.run(&mut ctx), ScreenId::Play);
        assert_eq!(probe.frames_presented(), 3);
        let frame = probe.last_frame().unwrap();
        assert!(frame.commands().iter().any(|c| matches!(
            c,
            DrawCmd::Text { text, .. } if text == "GAME OVER"
        )));
    }

    #[test]
    fn test_empty_text_shows_game_name() {
        assert_eq!(MessageScreen::new("", ScreenId::Intro).text(), GAME_NAME);
    }
}
