use std::path::{Path, PathBuf};
use std::sync::Arc;

use aa_app::Shell;
use aa_app::shell::PROMPT;
use aa_core::config::ArtConfig;
use aa_glyph::BuiltinGlyphs;

/// Écrit un PNG `width × height` : moitié gauche noire, moitié droite blanche.
fn split_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    image::RgbImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            image::Rgb([0, 0, 0])
        } else {
            image::Rgb([255, 255, 255])
        }
    })
    .save(&path)
    .unwrap();
    path
}

/// Runs a whole session and returns what each command printed.
fn session(config: ArtConfig, image: &Path, input: &str) -> Vec<String> {
    let image = aa_source::load_image(image).unwrap();
    let mut out = Vec::new();
    let mut shell = Shell::new(
        config,
        image,
        Arc::new(BuiltinGlyphs::default()),
        input.as_bytes(),
        &mut out,
    );
    shell.run().unwrap();
    drop(shell);

    let text = String::from_utf8(out).unwrap();
    let mut replies: Vec<String> = text.split(PROMPT).skip(1).map(str::to_string).collect();
    // Invite finale, avant `exit` ou la fin de l'entrée.
    assert_eq!(replies.pop().as_deref(), Some(""));
    replies
}

fn config(resolution: u32) -> ArtConfig {
    ArtConfig {
        resolution,
        ..ArtConfig::default()
    }
}

#[test]
fn charset_editing_and_rendering() {
    let dir = tempfile::tempdir().unwrap();
    let png = split_png(dir.path(), "split.png", 16, 8);

    let replies = session(
        config(4),
        &png,
        "chars\nadd a-c\nchars\nremove 0-9\nremove b\nchars\n\
         remove all\nadd space\nadd #\nres up\nasciiArt\nexit\n",
    );
    assert_eq!(
        replies,
        [
            "0 1 2 3 4 5 6 7 8 9 \n",
            "",
            "0 1 2 3 4 5 6 7 8 9 a b c \n",
            "",
            "",
            "a c \n",
            "",
            "",
            "",
            "Resolution set to 8.\n",
            "####    \n####    \n####    \n####    \n",
        ]
    );
}

#[test]
fn rejected_commands_print_their_reason() {
    let dir = tempfile::tempdir().unwrap();
    let png = split_png(dir.path(), "split.png", 16, 8);

    let replies = session(
        config(4),
        &png,
        "paint\nadd ab\nremove\nres left\noutput pdf\nimage /nonexistent/cat.jpeg\n\
         remove all\nasciiArt\nexit\n",
    );
    assert_eq!(
        replies,
        [
            "Did not execute due to incorrect command.\n",
            "Did not add due to incorrect format.\n",
            "Did not remove due to incorrect format.\n",
            "Did not change resolution due to incorrect format.\n",
            "Did not change output method due to incorrect format.\n",
            "Did not execute due to problem with image file.\n",
            "",
            "Did not execute. Charset is empty.\n",
        ]
    );
}

#[test]
fn image_swap_clamps_resolution() {
    let dir = tempfile::tempdir().unwrap();
    let square = split_png(dir.path(), "square.png", 16, 16);
    let wide = split_png(dir.path(), "wide.png", 64, 4);

    // 64×4 : bornes 16..=64, la résolution 4 devient 16.
    let input = format!("image {}\nres down\nres up\nexit\n", wide.display());
    let replies = session(config(4), &square, &input);
    assert_eq!(
        replies,
        [
            "",
            "Did not change resolution due to exceeding boundaries.\n",
            "Resolution set to 32.\n",
        ]
    );
}

#[test]
fn swapped_image_is_rendered() {
    let dir = tempfile::tempdir().unwrap();
    let small = split_png(dir.path(), "small.png", 4, 4);
    let large = split_png(dir.path(), "large.png", 8, 2);

    let input = format!(
        "remove all\nadd space\nadd #\nasciiArt\nimage {}\nasciiArt\nexit\n",
        large.display()
    );
    let replies = session(config(2), &small, &input);
    assert_eq!(replies[3], "# \n# \n");
    // 8×2 : bornes 4..=8, 2 colonnes ramenées à 4, tuiles de 2 px.
    assert_eq!(replies[5], "##  \n");
}

#[test]
fn html_output_writes_the_configured_file() {
    let dir = tempfile::tempdir().unwrap();
    let png = split_png(dir.path(), "split.png", 8, 8);
    let html = dir.path().join("art.html");

    let config = ArtConfig {
        resolution: 2,
        html_path: html.clone(),
        html_font: "Courier New".to_string(),
        ..ArtConfig::default()
    };
    let replies = session(
        config,
        &png,
        "remove all\nadd space\nadd #\noutput html\nasciiArt\noutput console\nasciiArt\nexit\n",
    );
    // Rien sur la console pendant le rendu HTML.
    assert_eq!(replies[4], "");
    assert_eq!(replies[6], "# \n# \n");

    let written = std::fs::read_to_string(&html).unwrap();
    assert!(written.contains("font-family:'Courier New'"));
    assert!(written.contains("# \n# \n</pre>"));
}

#[test]
fn end_of_input_without_exit() {
    let dir = tempfile::tempdir().unwrap();
    let png = split_png(dir.path(), "split.png", 8, 8);
    let replies = session(config(8), &png, "res up");
    assert_eq!(
        replies,
        ["Did not change resolution due to exceeding boundaries.\n"]
    );
}
