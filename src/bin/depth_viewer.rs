// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};
use std::{env, error::Error, path::PathBuf, process};

use disparity_depth as dd;
use dd::core::camera::CameraParameters;
use dd::core::disparity::DisparityMap;
use dd::core::interaction::MousePoller;
use dd::core::legend::{LegendConfig, LegendStyle};
use dd::error::DepthError;
use dd::misc::colormap::Colormap;
use dd::misc::type_aliases::{Float, Pixel};
use dd::viewer::{OverlayConfig, Viewer};

const USAGE: &str =
    "Usage: ./depth_viewer <baseline> <fx> <disparity_factor> <image_path> [divisors|interval] [jet|viridis]";

const WINDOW_TITLE: &str = "Depth Viewer";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let args: Vec<String> = env::args().collect();
    let valid_args = match check_args(&args) {
        Ok(valid_args) => valid_args,
        Err(error) => {
            eprintln!("{}", error);
            eprintln!("{}", USAGE);
            process::exit(1);
        }
    };
    if let Err(error) = my_run(valid_args) {
        eprintln!("{}", error);
        process::exit(1);
    }
}

fn my_run(args: Args) -> Result<(), Box<dyn Error>> {
    // Echo parameters before any image work.
    println!("Input parameters:");
    println!("baseline: {:.8}", args.camera.baseline);
    println!("fx: {:.8}", args.camera.fx);
    println!("disparity_factor: {}", args.camera.scale_factor);
    println!("image_path: {}", args.image_path.display());

    // Load the disparity map and report its range.
    let map = DisparityMap::load(&args.image_path, &args.camera)?;
    let legend_config = LegendConfig {
        style: args.legend_style,
        colormap: args.colormap,
        ..LegendConfig::default()
    };
    let viewer = Viewer::new(args.camera, map, &legend_config, OverlayConfig::default())?;
    let range = viewer.range();
    println!("Min disparity: {}", range.min_disparity);
    println!("Max disparity: {}", range.max_disparity);
    println!("Min distance: {}m", range.min_distance);
    println!("Max distance: {}m", range.max_distance);
    run_window(viewer)
}

/// Render loop: draw the frame, poll the mouse, stop on Esc or window close.
fn run_window(mut viewer: Viewer) -> Result<(), Box<dyn Error>> {
    let (width, height) = (viewer.width(), viewer.height());
    let mut window = Window::new(
        WINDOW_TITLE,
        width,
        height,
        WindowOptions {
            resize: true,
            ..WindowOptions::default()
        },
    )?;
    window.set_target_fps(60);

    let mut poller = MousePoller::default();
    let mut buffer: Vec<u32> = vec![0; width * height];
    while window.is_open() && !window.is_key_down(Key::Escape) {
        // Clamped positions keep the drag alive when the cursor leaves the window.
        let inside = window.get_mouse_pos(MouseMode::Discard).is_some();
        if let Some((mx, my)) = window.get_mouse_pos(MouseMode::Clamp) {
            let position = to_image_coordinates((mx, my), window.get_size(), (width, height));
            let is_down = window.get_mouse_down(MouseButton::Left);
            if let Some(event) = poller.poll(position, is_down) {
                viewer.handle(event);
            }
        }
        if !inside {
            viewer.cursor_left();
        }

        let frame = viewer.render();
        for (dst, px) in buffer.iter_mut().zip(frame.pixels()) {
            let [r, g, b] = px.0;
            *dst = (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b);
        }
        window.update_with_buffer(&buffer, width, height)?;
    }
    Ok(())
}

/// Window coordinates to image pixel, the window may have been resized.
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
fn to_image_coordinates(
    (mx, my): (f32, f32),
    (win_w, win_h): (usize, usize),
    (img_w, img_h): (usize, usize),
) -> Pixel {
    let scale = |m: f32, win: usize, img: usize| {
        let v = if win == 0 { m } else { m * img as f32 / win as f32 };
        (v.floor() as i32).max(0).min(img as i32 - 1)
    };
    Pixel::new(scale(mx, win_w, img_w), scale(my, win_h, img_h))
}

struct Args {
    camera: CameraParameters,
    image_path: PathBuf,
    legend_style: LegendStyle,
    colormap: Colormap,
}

/// Verify that command line arguments are correct.
fn check_args(args: &[String]) -> Result<Args, DepthError> {
    let (camera_args, image_path, legend_style, colormap) = match args {
        [_, b, fx, factor, path] => ((b, fx, factor), path, None, None),
        [_, b, fx, factor, path, style] => ((b, fx, factor), path, Some(style), None),
        [_, b, fx, factor, path, style, cmap] => {
            ((b, fx, factor), path, Some(style), Some(cmap))
        }
        _ => {
            return Err(DepthError::invalid_argument(
                "arguments",
                &args.iter().skip(1).cloned().collect::<Vec<_>>().join(" "),
                "expected 4 to 6 arguments",
            ))
        }
    };
    let (baseline, fx, factor) = camera_args;
    let camera = CameraParameters::new(
        parse_float("baseline", baseline)?,
        parse_float("fx", fx)?,
        factor.parse::<u32>().map_err(|_| {
            DepthError::invalid_argument("disparity_factor", factor, "must be a positive integer")
        })?,
    )?;
    Ok(Args {
        camera,
        image_path: PathBuf::from(image_path),
        legend_style: legend_style.map_or(Ok(LegendStyle::default()), |s| s.parse())?,
        colormap: colormap.map_or(Ok(Colormap::default()), |s| s.parse())?,
    })
}

fn parse_float(name: &'static str, value: &str) -> Result<Float, DepthError> {
    value
        .parse::<Float>()
        .map_err(|_| DepthError::invalid_argument(name, value, "not a number"))
}
