use serde::Serialize;
use tracing::info;

use foundation::math::{GeoCoordinate, Vec2};
use runtime::{
    Atlas, AtlasError, KEY_META, KEY_SHIFT, MapViewport, RecordingViewport, ViewportOptions,
};
use scene::RecordingElement;
use scene::components::AxisUpdate;

pub type ShellAtlas = Atlas<RecordingElement, LoggingViewport>;

/// Recording viewport that also traces every update.
#[derive(Debug, Clone)]
pub struct LoggingViewport {
    index: usize,
    inner: RecordingViewport,
}

impl LoggingViewport {
    pub fn new(index: usize, options: &ViewportOptions) -> Self {
        info!(index, lat = options.center.lat, lng = options.center.lng, "viewport created");
        Self {
            index,
            inner: RecordingViewport::new(options),
        }
    }

    pub fn center(&self) -> GeoCoordinate {
        self.inner.center
    }
}

impl MapViewport for LoggingViewport {
    fn set_center(&mut self, center: GeoCoordinate) {
        tracing::debug!(index = self.index, lat = center.lat, lng = center.lng, "set_center");
        self.inner.set_center(center);
    }

    fn set_zoom(&mut self, zoom: f64) {
        tracing::debug!(index = self.index, zoom, "set_zoom");
        self.inner.set_zoom(zoom);
    }
}

/// Modifier held for the duration of a scripted drag.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Modifier {
    Shift,
    Meta,
}

impl Modifier {
    fn key_code(self) -> u32 {
        match self {
            Modifier::Shift => KEY_SHIFT,
            Modifier::Meta => KEY_META,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Rotate(AxisUpdate),
    Fold(f64),
    Drag {
        from: Vec2,
        to: Vec2,
        modifier: Option<Modifier>,
    },
    Wheel(f64),
    Centers,
    State,
    Help,
    Quit,
}

#[derive(Debug, Serialize)]
struct FaceCenter {
    face: usize,
    lat: f64,
    lng: f64,
}

pub const HELP: &str = "\
Commands:
  rotate [x=DEG] [y=DEG] [z=DEG]     rotate the whole map (stored mod 360)
  fold DEG                           fold faces into an accordion
  drag X0 Y0 X1 Y1 [shift|meta]      press, move and release the pointer
  wheel DELTA_Y                      one wheel notch (positive zooms out)
  centers                            geographic center of every face
  state                              full snapshot as JSON
  help                               this text
  quit                               leave the shell
";

fn parse_number(token: &str) -> Result<f64, String> {
    let value: f64 = token
        .parse()
        .map_err(|_| format!("not a number: {token:?}"))?;
    if !value.is_finite() {
        return Err(format!("not a finite number: {token:?}"));
    }
    Ok(value)
}

fn expect_args<'a>(args: &'a [&'a str], count: usize, usage: &str) -> Result<&'a [&'a str], String> {
    if args.len() < count {
        return Err(format!("usage: {usage}"));
    }
    Ok(args)
}

impl Command {
    /// Parse one shell line. Blank lines and `#` comments yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let (name, args) = (tokens[0], &tokens[1..]);

        let command = match name {
            "rotate" => {
                let mut update = AxisUpdate::default();
                for arg in args {
                    let (axis, value) = arg
                        .split_once('=')
                        .ok_or_else(|| format!("expected AXIS=DEG, got {arg:?}"))?;
                    let value = parse_number(value)?;
                    match axis {
                        "x" => update.x = Some(value),
                        "y" => update.y = Some(value),
                        "z" => update.z = Some(value),
                        other => return Err(format!("unknown axis {other:?}")),
                    }
                }
                if update.is_empty() {
                    return Err("usage: rotate [x=DEG] [y=DEG] [z=DEG]".to_string());
                }
                Command::Rotate(update)
            }
            "fold" => {
                let args = expect_args(args, 1, "fold DEG")?;
                Command::Fold(parse_number(args[0])?)
            }
            "drag" => {
                let args = expect_args(args, 4, "drag X0 Y0 X1 Y1 [shift|meta]")?;
                let modifier = match args.get(4).copied() {
                    None => None,
                    Some("shift") => Some(Modifier::Shift),
                    Some("meta") => Some(Modifier::Meta),
                    Some(other) => return Err(format!("unknown modifier {other:?}")),
                };
                Command::Drag {
                    from: Vec2::new(parse_number(args[0])?, parse_number(args[1])?),
                    to: Vec2::new(parse_number(args[2])?, parse_number(args[3])?),
                    modifier,
                }
            }
            "wheel" => {
                let args = expect_args(args, 1, "wheel DELTA_Y")?;
                Command::Wheel(parse_number(args[0])?)
            }
            "centers" => Command::Centers,
            "state" => Command::State,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(format!("unknown command {other:?}; try `help`")),
        };
        Ok(Some(command))
    }
}

/// Build an atlas on recording elements and insert it with logging viewports.
pub fn build_atlas(options: runtime::AtlasOptions) -> Result<ShellAtlas, AtlasError> {
    let mut atlas = Atlas::new(RecordingElement::new("root"), options, |class| {
        Ok(RecordingElement::new(class))
    })?;

    let mut index = 0;
    atlas.insert(|_, viewport_options| {
        let viewport = LoggingViewport::new(index, viewport_options);
        index += 1;
        Ok(viewport)
    })?;
    Ok(atlas)
}

/// Run one command. Returns text to print, if any.
pub fn execute(atlas: &mut ShellAtlas, command: &Command) -> Result<Option<String>, String> {
    match command {
        Command::Rotate(update) => {
            atlas.rotate(*update);
            let r = atlas.world().map().rotation();
            Ok(Some(format!("rotation x={} y={} z={}", r.x, r.y, r.z)))
        }
        Command::Fold(angle) => {
            atlas.fold(*angle);
            Ok(Some(format!("folded to {angle} deg")))
        }
        Command::Drag { from, to, modifier } => {
            if let Some(m) = modifier {
                atlas.on_key_down(m.key_code());
            }
            atlas.on_pointer_down(*from);
            atlas.on_pointer_move(*to);
            atlas.on_pointer_up();
            if let Some(m) = modifier {
                atlas.on_key_up(m.key_code());
            }
            Ok(None)
        }
        Command::Wheel(delta_y) => {
            atlas.on_wheel(*delta_y);
            let zoom = atlas.virtual_map().map(|m| m.zoom()).unwrap_or_default();
            Ok(Some(format!("zoom {zoom}")))
        }
        Command::Centers => {
            let centers: Vec<FaceCenter> = atlas
                .virtual_map()
                .map(|m| m.viewports())
                .unwrap_or_default()
                .iter()
                .enumerate()
                .map(|(face, viewport)| FaceCenter {
                    face,
                    lat: viewport.center().lat,
                    lng: viewport.center().lng,
                })
                .collect();
            serde_json::to_string_pretty(&centers)
                .map(Some)
                .map_err(|e| e.to_string())
        }
        Command::State => serde_json::to_string_pretty(&atlas.snapshot())
            .map(Some)
            .map_err(|e| e.to_string()),
        Command::Help => Ok(Some(HELP.to_string())),
        Command::Quit => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{Command, Modifier, build_atlas, execute};
    use foundation::math::Vec2;
    use runtime::AtlasOptions;
    use scene::components::{Axis3, AxisUpdate};

    #[test]
    fn parses_rotate_with_partial_axes() {
        assert_eq!(
            Command::parse("rotate x=380 z=0"),
            Ok(Some(Command::Rotate(AxisUpdate {
                x: Some(380.0),
                y: None,
                z: Some(0.0),
            })))
        );
        assert!(Command::parse("rotate").is_err());
        assert!(Command::parse("rotate w=1").is_err());
    }

    #[test]
    fn parses_drag_with_modifier() {
        assert_eq!(
            Command::parse("drag 0 0 10 -5 meta"),
            Ok(Some(Command::Drag {
                from: Vec2::new(0.0, 0.0),
                to: Vec2::new(10.0, -5.0),
                modifier: Some(Modifier::Meta),
            }))
        );
        assert!(Command::parse("drag 0 0 10").is_err());
        assert!(Command::parse("drag 0 0 1 1 ctrl").is_err());
    }

    #[test]
    fn skips_blank_lines_and_comments() {
        assert_eq!(Command::parse("   "), Ok(None));
        assert_eq!(Command::parse("# fold 20"), Ok(None));
        assert!(Command::parse("fold NaN").is_err());
        assert!(Command::parse("launch").is_err());
    }

    #[test]
    fn scripted_session_updates_state() {
        let mut atlas = build_atlas(AtlasOptions::default()).expect("atlas");
        for line in ["fold 20", "rotate x=380", "drag 0 0 20 -10 shift", "wheel 1"] {
            let command = Command::parse(line).expect("parse").expect("command");
            execute(&mut atlas, &command).expect("execute");
        }

        assert_eq!(atlas.fold_angle(), 20.0);
        assert_eq!(*atlas.world().map().rotation(), Axis3::new(25.0, 10.0, 0.0));
        assert!(!atlas.input().shift());
        assert_eq!(atlas.virtual_map().map(|m| m.zoom()), Some(9.0));
    }

    #[test]
    fn centers_lists_every_face() {
        let mut atlas = build_atlas(AtlasOptions::default()).expect("atlas");
        let out = execute(&mut atlas, &Command::Centers)
            .expect("execute")
            .expect("output");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json");
        assert_eq!(parsed.as_array().map(Vec::len), Some(6));
        assert_eq!(parsed[5]["face"], 5);
    }
}
