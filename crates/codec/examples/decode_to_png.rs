//! Decode a raw dump into a PNG:
//!
//! ```text
//! cargo run --example decode_to_png -- frame.raw NV12 1920 1080 0 frame.png
//! ```

use std::{env, fs, process::ExitCode};

use rawlake_codec::{prelude::*, registry};

fn usage() -> ExitCode {
    eprintln!("usage: decode_to_png <input> <format> <width> <height> <stride> <output.png>");
    let names: Vec<_> = registry::display_names().collect();
    eprintln!("formats: {}", names.join(", "));
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let [input, format, width, height, stride, output] = &args[..] else {
        return usage();
    };
    let (Ok(width), Ok(height), Ok(stride)) =
        (width.parse::<u32>(), height.parse::<u32>(), stride.parse::<usize>())
    else {
        return usage();
    };
    let Some(geometry) = BufferGeometry::new(width, height, stride) else {
        eprintln!("width and height must be non-zero");
        return ExitCode::FAILURE;
    };

    let data = match fs::read(input) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("cannot read {input}: {err}");
            return ExitCode::FAILURE;
        }
    };
    let img = match decode_named(&data, format, geometry) {
        Ok(img) => img,
        Err(err) => {
            eprintln!("decode failed: {err}");
            return ExitCode::FAILURE;
        }
    };
    let Some(dynimg) = rawlake_codec::into_dynamic_image(img) else {
        eprintln!("decoded buffer has inconsistent dimensions");
        return ExitCode::FAILURE;
    };
    if let Err(err) = dynimg.save(output) {
        eprintln!("cannot write {output}: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
