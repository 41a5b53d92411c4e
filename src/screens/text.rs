//! Static text screens: intro, rules and credits.
//!
//! All three share the same structure (title, a block of alternating-color
//! lines, a "press spacebar" tip and their own music) and differ only in
//! content and placement, which [`TextPage`] describes.

use crate::components::anchor::Anchorage;
use crate::components::color::Color;
use crate::components::drawable::Drawable;
use crate::components::movable::Movable;
use crate::components::rect::{Point, Size};
use crate::components::sprite::Sprite;
use crate::components::spritelayer::SpriteLayer;
use crate::game::{
    BACKGROUND_COLOR, GAME_NAME, GameContext, GameError, TEXT_COLOR_HI, TEXT_COLOR_LO,
    TIP_COLOR, TIP_TEXT, TITLE_COLOR,
};
use crate::platform::Frame;
use crate::resources::assets::{FontId, MusicId};
use crate::screens::{Screen, ScreenId, from_events};

const INTRO_LINES: [&str; 9] = [
    "Arrow keys: player move",
    "Spacebar: player action",
    "'C': Credits - contributors",
    "'H': Help - game rules",
    "'F': Toggle fullscreen mode",
    "'P': Pause/resume game",
    "'M': Pause/resume music",
    "'S': Pause/resume sound",
    "'Q'/'X'/'Esc': Quit game",
];

const RULES_LINES: [&str; 6] = [
    "Help Maximilian in his quest for",
    "beauty and wonder.",
    "But beware, oxygen is rapidly",
    "exhausted while diving so far.",
    "Maybe some fish could help?",
    "Enjoy.",
];

const CREDITS_LINES: [&str; 9] = [
    "LIBRARY",
    "© Ramon Santamaria and contributors",
    "for raylib and its Rust bindings.",
    "https://www.raylib.com/",
    "GRAPHICS, MUSICS & SOUNDS",
    "Many thanks to all people who have",
    "directly or indirectly contributed to",
    "this experimental game project.",
    "© authors for their respective artworks.",
];

/// Which text screen, with its content and layout rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextPage {
    Intro,
    Rules,
    Credits,
}

impl TextPage {
    fn title(&self) -> (&'static str, FontId) {
        match self {
            TextPage::Intro => (GAME_NAME, FontId::GameName),
            TextPage::Rules => ("Game Rules", FontId::Title),
            TextPage::Credits => ("Credits", FontId::Title),
        }
    }

    fn lines(&self) -> &'static [&'static str] {
        match self {
            TextPage::Intro => &INTRO_LINES,
            TextPage::Rules => &RULES_LINES,
            TextPage::Credits => &CREDITS_LINES,
        }
    }

    fn music(&self) -> MusicId {
        match self {
            TextPage::Intro => MusicId::Intro,
            TextPage::Rules => MusicId::Rules,
            TextPage::Credits => MusicId::Credits,
        }
    }

    /// Where "play" leads from this page.
    fn next(&self) -> ScreenId {
        match self {
            TextPage::Intro => ScreenId::Rules,
            TextPage::Rules | TextPage::Credits => ScreenId::Play,
        }
    }

    fn title_position(&self, window: Size) -> (Point, Anchorage) {
        match self {
            TextPage::Intro => (Point::new(window.w / 2, window.h / 7), Anchorage::CENTER),
            TextPage::Rules | TextPage::Credits => {
                (Point::new(window.w / 2, 10), Anchorage::NORTH)
            }
        }
    }

    fn line_position(&self, window: Size, i: i32, n: i32) -> (Point, Anchorage) {
        let center = Point::new(window.w / 2, window.h / 2);
        match self {
            TextPage::Intro => (
                Point::new(
                    (center.x as f32 / 2.25) as i32,
                    center.y - 5 + 28 * (i + 1 - n / 2),
                ),
                Anchorage::NORTH_WEST,
            ),
            TextPage::Rules => (
                Point::new(center.x / 4, center.y + 20 + 32 * (i - n / 2)),
                Anchorage::WEST,
            ),
            TextPage::Credits => (
                Point::new(40, center.y + 10 + 32 * (i - n / 2)),
                Anchorage::WEST,
            ),
        }
    }

    fn user_info_position(&self, window: Size) -> Point {
        let center = Point::new(window.w / 2, window.h / 2);
        match self {
            TextPage::Intro => Point::new(center.x, center.y / 2 + 5),
            TextPage::Rules => Point::new(center.x, center.y / 2 - 10),
            TextPage::Credits => Point::new(center.x, center.y / 3 + 10),
        }
    }
}

pub struct TextScreen {
    page: TextPage,
    title: Sprite,
    tip: Sprite,
    lines: SpriteLayer<Sprite>,
}

impl TextScreen {
    pub fn new(page: TextPage) -> Self {
        Self {
            page,
            title: Sprite::new(),
            tip: Sprite::new(),
            lines: SpriteLayer::new(),
        }
    }

    pub fn intro() -> Self {
        Self::new(TextPage::Intro)
    }

    pub fn rules() -> Self {
        Self::new(TextPage::Rules)
    }

    pub fn credits() -> Self {
        Self::new(TextPage::Credits)
    }

    pub fn page(&self) -> TextPage {
        self.page
    }

    pub fn lines(&self) -> &SpriteLayer<Sprite> {
        &self.lines
    }
}

impl Screen for TextScreen {
    fn initialize(&mut self, ctx: &mut GameContext) -> Result<(), GameError> {
        let platform = ctx.platform.as_ref();
        let window = ctx.window_size();

        let (title, font) = self.page.title();
        self.title = Sprite::text(platform, font, title, TITLE_COLOR);
        let (anchor, anchorage) = self.page.title_position(window);
        self.title
            .set_position_anchored(anchor.x, anchor.y, anchorage);

        self.tip = Sprite::text(platform, FontId::Tip, TIP_TEXT, TIP_COLOR);
        self.tip
            .set_position_anchored(window.w / 2, window.h - 20, Anchorage::SOUTH);

        self.lines = SpriteLayer::new();
        let texts = self.page.lines();
        let n = texts.len() as i32;
        for (i, text) in texts.iter().enumerate() {
            let color = if i % 2 == 1 {
                TEXT_COLOR_HI
            } else {
                TEXT_COLOR_LO
            };
            let mut line = Sprite::text(platform, FontId::Menu, text, color);
            let (anchor, anchorage) = self.page.line_position(window, i as i32, n);
            line.set_position_anchored(anchor.x, anchor.y, anchorage);
            self.lines.push(line);
        }
        Ok(())
    }

    fn reset(&mut self, ctx: &mut GameContext) -> ScreenId {
        ctx.play_music(self.page.music());
        let anchor = self.page.user_info_position(ctx.window_size());
        ctx.user_info.reset(anchor, Anchorage::CENTER);
        if self.page == TextPage::Intro {
            ctx.user_info.set_color(Color::from_rgba(0xd2d2d2ff));
            ctx.user_info.set_font(FontId::Tip);
        }
        ScreenId::Current
    }

    fn do_events(&mut self, ctx: &mut GameContext) -> ScreenId {
        from_events(ctx, self.page.next())
    }

    fn do_drawings(&mut self, ctx: &mut GameContext) -> ScreenId {
        let mut frame = Frame::new();
        frame.clear(BACKGROUND_COLOR);
        self.title.draw(&mut frame);
        self.lines.draw(&mut frame);
        self.tip.draw(&mut frame);
        ctx.present(&mut frame);
        ScreenId::Current
    }
}
