use hex8_core::state::FrameBuffer;

const LIT: char = '#';
const UNLIT: char = '.';

/// Renders a frame as one line of text per row, for terminals and logs.
pub fn render(frame: &FrameBuffer) -> String {
    frame
        .iter()
        .flat_map(|row| {
            row.iter()
                .map(|&px| if px == 1 { LIT } else { UNLIT })
                .chain(std::iter::once('\n'))
        })
        .collect()
}
