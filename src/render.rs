//! Frame composition over an abstract drawing surface
//!
//! Hosts implement [`Surface`] for whatever they draw on (a canvas 2D context
//! in the browser, a recorder in tests); [`draw_frame`] decides what goes
//! where.

use glam::Vec2;

use crate::assets::Sprites;
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::sim::{GamePhase, GameState};

/// How a position relates to the drawn box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Position is the top-left corner
    Corner,
    /// Position is the center
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Middle,
}

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const PADDLE: Rgb = Rgb(100, 200, 255);

    /// CSS color string
    pub fn to_css(self) -> String {
        format!("rgb({}, {}, {})", self.0, self.1, self.2)
    }
}

/// Font size, alignment and color for a text draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub h_align: HAlign,
    pub v_align: VAlign,
    pub color: Rgb,
}

/// A 2D drawing target with a transform stack
pub trait Surface {
    type Image;

    fn draw_image(&mut self, image: &Self::Image, pos: Vec2, size: Vec2, anchor: Anchor);
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, anchor: Anchor, color: Rgb);
    fn fill_text(&mut self, text: &str, pos: Vec2, style: TextStyle);

    /// Push the current transform
    fn save(&mut self);
    /// Pop back to the last saved transform
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, radians: f32);
}

const HUD_STYLE: TextStyle = TextStyle {
    size: 18.0,
    h_align: HAlign::Left,
    v_align: VAlign::Top,
    color: Rgb::WHITE,
};

const HEADLINE_STYLE: TextStyle = TextStyle {
    size: 32.0,
    h_align: HAlign::Center,
    v_align: VAlign::Middle,
    color: Rgb::WHITE,
};

const SUBTITLE_STYLE: TextStyle = TextStyle {
    size: 20.0,
    ..HEADLINE_STYLE
};

/// Draw one frame of the session
pub fn draw_frame<S: Surface>(surface: &mut S, state: &GameState, sprites: &Sprites<S::Image>) {
    surface.draw_image(
        &sprites.background,
        Vec2::ZERO,
        Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT),
        Anchor::Corner,
    );

    match state.phase {
        GamePhase::Win => draw_end_screen(surface, "You Win! :D", state.score),
        GamePhase::Lose => draw_end_screen(surface, "Game Over :(", state.score),
        GamePhase::Playing => draw_playfield(surface, state, sprites),
    }
}

fn draw_playfield<S: Surface>(surface: &mut S, state: &GameState, sprites: &Sprites<S::Image>) {
    let paddle = &state.paddle;
    surface.save();
    surface.translate(paddle.pos);
    surface.fill_rect(Vec2::ZERO, paddle.size(), Anchor::Center, Rgb::PADDLE);
    surface.restore();

    let ball = &state.ball;
    surface.save();
    surface.translate(ball.pos);
    surface.rotate(ball.angle);
    surface.draw_image(
        &sprites.ball,
        Vec2::ZERO,
        Vec2::splat(ball.radius * 2.0),
        Anchor::Center,
    );
    surface.restore();

    for obstacle in &state.obstacles {
        surface.draw_image(
            sprites.obstacle(obstacle.variant),
            obstacle.pos,
            obstacle.size,
            Anchor::Center,
        );
    }

    surface.fill_text(
        &format!("Score: {}", state.score),
        Vec2::new(10.0, 10.0),
        HUD_STYLE,
    );
}

fn draw_end_screen<S: Surface>(surface: &mut S, headline: &str, score: u32) {
    let center = Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0);
    surface.fill_text(headline, center - Vec2::new(0.0, 40.0), HEADLINE_STYLE);
    surface.fill_text(&format!("Final Score: {score}"), center, SUBTITLE_STYLE);
}
