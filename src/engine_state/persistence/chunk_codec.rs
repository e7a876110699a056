//! # Chunk Block Codes
//!
//! A chunk's cells are written in storage order (y from the bottom of the world
//! up, then local x, then local z) as runs of identical block ids. Each run is
//! four symbols: the id's high and low six bits, then the run length's high and
//! low six bits. Empty cells use the id [`EMPTY_BLOCK_CODE`].
//!
//! ```
//! use voxel_world::engine_state::persistence::chunk_codec::{decode_chunk, encode_chunk};
//! use voxel_world::engine_state::voxels::{
//!     block::{block_type::BlockType, Block},
//!     chunk::Chunk,
//!     coords::ChunkPosition,
//! };
//!
//! let position = ChunkPosition::new(0, 0);
//! let mut chunk = Chunk::empty(position);
//! chunk.set_block(0, 0, 0, Block::new(BlockType::DIRT));
//!
//! let code = encode_chunk(&chunk);
//! assert!(code.starts_with("ABAB"));
//! let decoded = decode_chunk(position, &code).unwrap();
//! assert_eq!(decoded.get_block(0, 0, 0), Some(Block::new(BlockType::DIRT)));
//! ```

use thiserror::Error;

use super::alphabet::{decode_symbol, push_pair};
use crate::engine_state::voxels::{
    block::{Block, BlockTypeSize},
    chunk::{Chunk, CHUNK_VOLUME},
    coords::ChunkPosition,
};

/// Block id written for empty cells.
pub const EMPTY_BLOCK_CODE: BlockTypeSize = 4095;
/// Longest run a single group can describe.
pub const MAX_RUN_LENGTH: usize = 4095;

/// Symbols per run group.
const GROUP_LENGTH: usize = 4;

/// Why a block code could not be decoded.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BlockCodeError {
    /// The code is not made of whole four-symbol groups.
    #[error("length {0} is not a multiple of {}", GROUP_LENGTH)]
    Length(usize),
    /// A symbol outside the alphabet.
    #[error("invalid symbol {symbol:?} at offset {offset}")]
    Symbol {
        /// The offending character.
        symbol: char,
        /// Its position in the code, in characters.
        offset: usize,
    },
    /// The runs do not cover the chunk exactly.
    #[error("runs cover {0} cells, expected {}", CHUNK_VOLUME)]
    Volume(usize),
    /// A block id that is neither a registered block nor the empty marker.
    #[error("unknown block id {0}")]
    UnknownBlock(BlockTypeSize),
}

/// Encodes every cell of `chunk`.
pub fn encode_chunk(chunk: &Chunk) -> String {
    let mut code = String::new();
    let mut run: Option<(BlockTypeSize, usize)> = None;

    for index in 0..CHUNK_VOLUME {
        let id = chunk
            .get_block_at_index(index)
            .map_or(EMPTY_BLOCK_CODE, |block| block.id());
        run = match run {
            Some((run_id, length)) if run_id == id && length < MAX_RUN_LENGTH => {
                Some((run_id, length + 1))
            }
            Some((run_id, length)) => {
                push_run(&mut code, run_id, length);
                Some((id, 1))
            }
            None => Some((id, 1)),
        };
    }
    if let Some((run_id, length)) = run {
        push_run(&mut code, run_id, length);
    }
    code
}

fn push_run(code: &mut String, id: BlockTypeSize, length: usize) {
    push_pair(code, id);
    push_pair(code, length as u16);
}

/// Rebuilds a chunk at `position` from its block code.
///
/// The returned chunk is not generated or loaded; callers restore those flags.
pub fn decode_chunk(position: ChunkPosition, code: &str) -> Result<Chunk, BlockCodeError> {
    let symbols = code
        .chars()
        .enumerate()
        .map(|(offset, symbol)| decode_symbol(symbol).ok_or(BlockCodeError::Symbol { symbol, offset }))
        .collect::<Result<Vec<u16>, _>>()?;
    if symbols.len() % GROUP_LENGTH != 0 {
        return Err(BlockCodeError::Length(symbols.len()));
    }

    let mut chunk = Chunk::empty(position);
    let mut index = 0;
    for group in symbols.chunks_exact(GROUP_LENGTH) {
        let id = group[0] << 6 | group[1];
        let length = (group[2] << 6 | group[3]) as usize;
        if index + length > CHUNK_VOLUME {
            return Err(BlockCodeError::Volume(index + length));
        }
        if id != EMPTY_BLOCK_CODE {
            let block = Block::from_id(id).ok_or(BlockCodeError::UnknownBlock(id))?;
            for cell in index..index + length {
                chunk.set_block_at_index(cell, block);
            }
        }
        index += length;
    }
    if index != CHUNK_VOLUME {
        return Err(BlockCodeError::Volume(index));
    }

    chunk.mark_dirty();
    Ok(chunk)
}
