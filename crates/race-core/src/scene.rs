//! Scene composition: turns the current frame's platforms and marbles into
//! an ordered list of drawing commands for a host backend.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::config::RaceConfig;
use crate::level::Platform;
use crate::race::MarbleView;

/// Linear gradient between two points with positioned color stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearGradient {
    pub from: [f32; 2],
    pub to: [f32; 2],
    pub stops: Vec<(f32, Color)>,
}

/// Radial gradient between an inner and an outer circle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadialGradient {
    pub from: [f32; 2],
    pub from_radius: f32,
    pub to: [f32; 2],
    pub to_radius: f32,
    pub stops: Vec<(f32, Color)>,
}

/// Fill style for solid shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Fill {
    Solid(Color),
    Linear(LinearGradient),
    Radial(RadialGradient),
}

/// Stroke style, optionally dashed and glowing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f32,
    /// `[dash length, gap length]`.
    pub dash: Option<[f32; 2]>,
    /// Glow blur radius; glow color matches the stroke color.
    pub glow_blur: Option<f32>,
}

impl StrokeStyle {
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dash: None,
            glow_blur: None,
        }
    }
}

/// One drawing command. Commands execute strictly in list order; transforms
/// nest via push/pop and apply to every command in between.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Clear {
        gradient: LinearGradient,
    },
    StrokeLine {
        from: [f32; 2],
        to: [f32; 2],
        style: StrokeStyle,
    },
    PushTransform {
        translation: [f32; 2],
        rotation: f32,
    },
    PopTransform,
    FillRect {
        min: [f32; 2],
        size: [f32; 2],
        fill: Fill,
    },
    FillEllipse {
        center: [f32; 2],
        radii: [f32; 2],
        fill: Fill,
    },
    FillCircle {
        center: [f32; 2],
        radius: f32,
        fill: Fill,
    },
    StrokeCircle {
        center: [f32; 2],
        radius: f32,
        style: StrokeStyle,
    },
}

/// Everything the compositor reads for one frame. All borrows; the scene
/// renderer never owns or mutates simulation state.
#[derive(Debug, Clone, Copy)]
pub struct SceneFrame<'a> {
    pub platforms: &'a [Platform],
    pub marbles: &'a [MarbleView],
    pub config: &'a RaceConfig,
}

/// Visual styling constants for scene composition.
#[derive(Debug, Clone)]
pub struct SceneStyle {
    pub background_top: Color,
    pub background_bottom: Color,
    pub finish_line_color: Color,
    pub finish_line_width: f32,
    pub finish_line_dash: [f32; 2],
    pub finish_line_glow: f32,
    /// Top-to-bottom platform body shading.
    pub platform_gradient: [Color; 3],
    /// Channel delta for the marble highlight stop.
    pub marble_lighten: u8,
    /// Channel delta for the marble rim stop.
    pub marble_darken: u8,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            background_top: Color::rgb(10, 10, 10),
            background_bottom: Color::BLACK,
            finish_line_color: Color::rgb(255, 255, 0),
            finish_line_width: 4.0,
            finish_line_dash: [15.0, 8.0],
            finish_line_glow: 15.0,
            platform_gradient: [
                Color::WHITE,
                Color::rgb(224, 224, 224),
                Color::rgb(176, 176, 176),
            ],
            marble_lighten: 80,
            marble_darken: 40,
        }
    }
}

/// Stateless per-frame compositor.
///
/// Holds only styling constants; composing the same frame twice yields the
/// same command list. Order per frame: background, finish line, platforms,
/// marbles — each group in collaborator list order, no depth sorting.
#[derive(Debug, Clone, Default)]
pub struct SceneRenderer {
    pub style: SceneStyle,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Composes one frame into drawing commands.
    pub fn compose(&self, frame: &SceneFrame<'_>) -> Vec<DrawCommand> {
        let mut commands = Vec::with_capacity(
            2 + frame.platforms.len() * 6 + frame.marbles.len() * 5,
        );

        self.clear_background(frame, &mut commands);
        self.finish_line(frame, &mut commands);
        for platform in frame.platforms {
            self.platform(platform, &mut commands);
        }
        for marble in frame.marbles {
            self.marble(marble, frame.config.marble_radius, &mut commands);
        }

        commands
    }

    fn clear_background(&self, frame: &SceneFrame<'_>, out: &mut Vec<DrawCommand>) {
        out.push(DrawCommand::Clear {
            gradient: LinearGradient {
                from: [0.0, 0.0],
                to: [0.0, frame.config.surface_height],
                stops: vec![
                    (0.0, self.style.background_top),
                    (1.0, self.style.background_bottom),
                ],
            },
        });
    }

    fn finish_line(&self, frame: &SceneFrame<'_>, out: &mut Vec<DrawCommand>) {
        out.push(DrawCommand::StrokeLine {
            from: [0.0, frame.config.finish_line_y],
            to: [frame.config.surface_width, frame.config.finish_line_y],
            style: StrokeStyle {
                color: self.style.finish_line_color,
                width: self.style.finish_line_width,
                dash: Some(self.style.finish_line_dash),
                glow_blur: Some(self.style.finish_line_glow),
            },
        });
    }

    /// Platform body in its local frame: drop shadow, shaded body, top
    /// highlight band, bottom shadow line.
    fn platform(&self, platform: &Platform, out: &mut Vec<DrawCommand>) {
        let (w, h) = (platform.width, platform.height);
        let [top, mid, bottom] = self.style.platform_gradient;

        out.push(DrawCommand::PushTransform {
            translation: platform.position,
            rotation: platform.angle,
        });
        out.push(DrawCommand::FillRect {
            min: [-w / 2.0 + 3.0, -h / 2.0 + 3.0],
            size: [w, h],
            fill: Fill::Solid(Color::BLACK.with_alpha(77)),
        });
        out.push(DrawCommand::FillRect {
            min: [-w / 2.0, -h / 2.0],
            size: [w, h],
            fill: Fill::Linear(LinearGradient {
                from: [-w / 2.0, -h / 2.0],
                to: [-w / 2.0, h / 2.0],
                stops: vec![(0.0, top), (0.5, mid), (1.0, bottom)],
            }),
        });
        out.push(DrawCommand::FillRect {
            min: [-w / 2.0, -h / 2.0],
            size: [w, h * 0.3],
            fill: Fill::Solid(Color::WHITE.with_alpha(102)),
        });
        out.push(DrawCommand::FillRect {
            min: [-w / 2.0, h / 2.0 - 2.0],
            size: [w, 2.0],
            fill: Fill::Solid(Color::BLACK.with_alpha(51)),
        });
        out.push(DrawCommand::PopTransform);
    }

    /// Marble with spherical shading: ground shadow, radial-gradient body,
    /// two specular dots, outline.
    fn marble(&self, marble: &MarbleView, radius: f32, out: &mut Vec<DrawCommand>) {
        let [x, y] = marble.position;

        out.push(DrawCommand::FillEllipse {
            center: [x, y + radius + 3.0],
            radii: [radius * 0.8, radius * 0.3],
            fill: Fill::Solid(Color::BLACK.with_alpha(102)),
        });
        out.push(DrawCommand::FillCircle {
            center: [x, y],
            radius,
            fill: Fill::Radial(RadialGradient {
                from: [x - radius * 0.3, y - radius * 0.3],
                from_radius: radius * 0.1,
                to: [x, y],
                to_radius: radius,
                stops: vec![
                    (0.0, marble.color.lighten(self.style.marble_lighten)),
                    (0.7, marble.color),
                    (1.0, marble.color.darken(self.style.marble_darken)),
                ],
            }),
        });
        out.push(DrawCommand::FillCircle {
            center: [x - radius * 0.3, y - radius * 0.3],
            radius: radius * 0.4,
            fill: Fill::Solid(Color::WHITE.with_alpha(153)),
        });
        out.push(DrawCommand::FillCircle {
            center: [x - radius * 0.25, y - radius * 0.25],
            radius: radius * 0.2,
            fill: Fill::Solid(Color::WHITE.with_alpha(204)),
        });
        out.push(DrawCommand::StrokeCircle {
            center: [x, y],
            radius,
            style: StrokeStyle::solid(Color::BLACK.with_alpha(77), 1.5),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LevelGenerator;
    use crate::physics::PhysicsWorld;

    fn test_frame_parts() -> (RaceConfig, Vec<Platform>, Vec<MarbleView>) {
        let config = RaceConfig::default();
        let mut world = PhysicsWorld::new();
        let platforms = LevelGenerator::generate(&mut world, &config, 3);
        let marbles = vec![
            MarbleView {
                position: [100.0, 50.0],
                color: Color::RED,
                color_index: 0,
                name: "Red",
            },
            MarbleView {
                position: [200.0, 80.0],
                color: Color::BLUE,
                color_index: 1,
                name: "Blue",
            },
        ];
        (config, platforms, marbles)
    }

    #[test]
    fn test_frame_starts_with_background_and_finish_line() {
        let (config, platforms, marbles) = test_frame_parts();
        let renderer = SceneRenderer::new();
        let commands = renderer.compose(&SceneFrame {
            platforms: &platforms,
            marbles: &marbles,
            config: &config,
        });

        assert!(matches!(commands[0], DrawCommand::Clear { .. }));
        match &commands[1] {
            DrawCommand::StrokeLine { from, to, style } => {
                assert_eq!(from[1], config.finish_line_y);
                assert_eq!(to[1], config.finish_line_y);
                assert!(style.dash.is_some());
                assert!(style.glow_blur.is_some());
            }
            other => panic!("expected finish line, got {other:?}"),
        }
    }

    #[test]
    fn test_platform_commands_are_transform_bracketed() {
        let (config, platforms, _) = test_frame_parts();
        let renderer = SceneRenderer::new();
        let commands = renderer.compose(&SceneFrame {
            platforms: &platforms,
            marbles: &[],
            config: &config,
        });

        let pushes = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::PushTransform { .. }))
            .count();
        let pops = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::PopTransform))
            .count();
        assert_eq!(pushes, platforms.len());
        assert_eq!(pops, platforms.len());

        // Each platform contributes exactly push, 4 fills, pop.
        let first_push = commands
            .iter()
            .position(|c| matches!(c, DrawCommand::PushTransform { .. }))
            .unwrap();
        assert!(matches!(commands[first_push + 5], DrawCommand::PopTransform));
    }

    #[test]
    fn test_marbles_render_after_all_platforms() {
        let (config, platforms, marbles) = test_frame_parts();
        let renderer = SceneRenderer::new();
        let commands = renderer.compose(&SceneFrame {
            platforms: &platforms,
            marbles: &marbles,
            config: &config,
        });

        let last_pop = commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::PopTransform))
            .unwrap();
        let first_marble = commands
            .iter()
            .position(|c| matches!(c, DrawCommand::FillEllipse { .. }))
            .unwrap();
        assert!(first_marble > last_pop);
    }

    #[test]
    fn test_marble_gradient_uses_shade_stops() {
        let (config, _, marbles) = test_frame_parts();
        let renderer = SceneRenderer::new();
        let commands = renderer.compose(&SceneFrame {
            platforms: &[],
            marbles: &marbles[..1],
            config: &config,
        });

        let body = commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::FillCircle {
                    fill: Fill::Radial(gradient),
                    ..
                } => Some(gradient),
                _ => None,
            })
            .expect("marble body present");

        assert_eq!(body.stops[0], (0.0, Color::RED.lighten(80)));
        assert_eq!(body.stops[1], (0.7, Color::RED));
        assert_eq!(body.stops[2], (1.0, Color::RED.darken(40)));
    }

    #[test]
    fn test_composition_is_pure() {
        let (config, platforms, marbles) = test_frame_parts();
        let renderer = SceneRenderer::new();
        let frame = SceneFrame {
            platforms: &platforms,
            marbles: &marbles,
            config: &config,
        };
        assert_eq!(renderer.compose(&frame), renderer.compose(&frame));
    }

    #[test]
    fn test_empty_frame_still_clears_and_marks_finish() {
        let config = RaceConfig::default();
        let renderer = SceneRenderer::new();
        let commands = renderer.compose(&SceneFrame {
            platforms: &[],
            marbles: &[],
            config: &config,
        });
        assert_eq!(commands.len(), 2);
    }
}
