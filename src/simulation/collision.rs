//! Silhouette-accurate collision between birds and pipes.

use super::bird::Bird;
use super::mask::Silhouettes;
use super::pipe::Pipe;

/// Whether any opaque pixel of the bird overlaps either pipe piece.
pub fn collides(bird: &Bird, pipe: &Pipe, silhouettes: &Silhouettes) -> bool {
    let bird_y = bird.y.round();
    let dx = (pipe.x - bird.x).round() as i32;
    let top_offset = (dx, (pipe.top.round() - bird_y) as i32);
    let bottom_offset = (dx, (pipe.bottom.round() - bird_y) as i32);

    silhouettes
        .bird
        .overlap(&silhouettes.pipe_top, top_offset)
        .is_some()
        || silhouettes
            .bird
            .overlap(&silhouettes.pipe_bottom, bottom_offset)
            .is_some()
}
