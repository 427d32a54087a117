/*!
    Acquiring the resources of a stream session.
*/

use std::{os::raw::c_int, path::Path, ptr};

use ffmpeg_next::{
    codec::{self, decoder},
    ffi, format,
    util::error::{EACCES, EIO, EISDIR, ENOENT, ENOTDIR, EPERM},
};
use tracing::debug;

use ffmpeg_engine::{Buffers, Demuxer as _};
use ffmpeg_transform::{ScalerConfig, SwsScaler};
use ffmpeg_types::{Error, Result};

use crate::backend::{Decoder, Demuxer, Ffmpeg, Frame, Packet, Scaler};
use crate::config::{DecoderConfig, lowres_level};

fn library_error(e: ffmpeg_next::Error) -> Error {
    Error::library(e.into())
}

/**
    Classify a failure to open a container. File system problems are
    [`Error::Io`], anything else (e.g. unrecognized data) is
    [`Error::Library`].
*/
fn open_error(e: ffmpeg_next::Error) -> Error {
    let code = c_int::from(e);
    match e {
        ffmpeg_next::Error::Other { errno }
            if matches!(errno, ENOENT | EACCES | EPERM | EIO | EISDIR | ENOTDIR) =>
        {
            Error::Io { code }
        }
        _ => Error::library(code),
    }
}

/**
    Open and probe the container at `path`.
*/
pub fn open_container(path: impl AsRef<Path>) -> Result<Demuxer> {
    let path = path.as_ref();
    ffmpeg_next::init().map_err(library_error)?;

    let input = format::input(path).map_err(open_error)?;
    debug!(
        path = %path.display(),
        streams = input.nb_streams(),
        format = input.format().name(),
        "opened container"
    );

    Ok(Demuxer { input })
}

/**
    Open a decoder for stream `stream_index` of `demuxer`.

    Fails with [`Error::IndexOutOfBounds`] for unknown streams,
    [`Error::DecoderNotFound`] if FFmpeg has no decoder for the stream and
    [`Error::StreamNotFound`] if the stream is not a suitable candidate for
    its media type.
*/
pub fn open_decoder(
    demuxer: &Demuxer,
    stream_index: usize,
    config: &DecoderConfig,
) -> Result<Decoder> {
    let count = demuxer.stream_count();
    let out_of_bounds = Error::IndexOutOfBounds {
        index: stream_index,
        count,
    };
    let stream = demuxer.input.stream(stream_index).ok_or(out_of_bounds)?;
    let wanted = c_int::try_from(stream_index).map_err(|_| out_of_bounds)?;
    let parameters = stream.parameters();

    let mut found: *const ffi::AVCodec = ptr::null();
    let selected = unsafe {
        ffi::av_find_best_stream(
            demuxer.input.as_ptr() as *mut ffi::AVFormatContext,
            parameters.medium().into(),
            wanted,
            -1,
            &mut found,
            0,
        )
    };
    if selected != wanted || found.is_null() {
        return Err(match ffmpeg_next::Error::from(selected) {
            ffmpeg_next::Error::DecoderNotFound => Error::DecoderNotFound,
            _ => Error::StreamNotFound,
        });
    }

    let (codec_id, max_lowres) = unsafe { ((*found).id, c_int::from((*found).max_lowres)) };
    let codec = decoder::find(codec_id.into()).ok_or(Error::DecoderNotFound)?;

    let mut context = codec::context::Context::from_parameters(parameters).map_err(library_error)?;
    let lowres = lowres_level(config.resolution, max_lowres);
    let threads = c_int::try_from(config.thread_count).unwrap_or(c_int::MAX);
    unsafe {
        let ptr = context.as_mut_ptr();
        (*ptr).lowres = lowres;
        (*ptr).thread_count = threads;
    }

    let inner = context
        .decoder()
        .open_as(codec)
        .and_then(|opened| opened.video())
        .map_err(library_error)?;

    debug!(
        stream = stream_index,
        codec = ?codec_id,
        lowres,
        threads,
        width = inner.width(),
        height = inner.height(),
        "opened decoder"
    );

    Ok(Decoder { inner })
}

/**
    Create a scaler for the output of `decoder`.
*/
pub fn open_scaler(decoder: &Decoder, config: &ScalerConfig) -> Result<Scaler> {
    SwsScaler::new(decoder.width(), decoder.height(), decoder.format(), config).map(Scaler)
}

/**
    Allocate the reusable packet, frame and scaled frame of a session.
*/
pub fn alloc_buffers() -> Buffers<Ffmpeg> {
    Buffers {
        packet: Packet::empty(),
        frame: Frame::empty(),
        scaled: Frame::empty(),
    }
}
