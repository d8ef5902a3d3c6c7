// src/batch_ops.rs

//! Parallel encryption and decryption of many independent streams.
//!
//! Every pair is processed with the same media key and media type. The first
//! error aborts the batch; pairs already processed keep their output.

use rayon::prelude::*;
use std::io::{Read, Write};

use crate::media_type::MediaType;
use crate::{decrypt, encrypt, MediaCryptoError};

pub fn encrypt_batch<R, W>(
    batch: &mut [(R, W)],
    media_key: &[u8],
    media_type: MediaType,
) -> Result<(), MediaCryptoError>
where
    R: Read + Send,
    W: Write + Send,
{
    batch
        .par_iter_mut()
        .try_for_each(|(src, dst)| encrypt(src, dst, media_key, media_type))
}

pub fn decrypt_batch<R, W>(
    batch: &mut [(R, W)],
    media_key: &[u8],
    media_type: MediaType,
) -> Result<(), MediaCryptoError>
where
    R: Read + Send,
    W: Write + Send,
{
    batch
        .par_iter_mut()
        .try_for_each(|(src, dst)| decrypt(src, dst, media_key, media_type))
}
