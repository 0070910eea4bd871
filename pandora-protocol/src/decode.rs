//! Typed decoders turning parsed responses into the wire data model.

use crate::{
    model::{Rating, SearchArtist, SearchResult, SearchSong, Song, Station, UserInfo},
    parser::{parse_response, Value},
    ProtocolError,
};

/// Decode a status-only response.  Any non-fault document counts as success;
/// the interesting outcome is the absence of a fault.
pub fn decode_simple(xml: &str) -> Result<(), ProtocolError> {
    parse_response(xml).map(|_| ())
}

pub fn decode_user_info(xml: &str) -> Result<UserInfo, ProtocolError> {
    let value = parse_response(xml)?;
    Ok(UserInfo {
        web_auth_token: member_str(&value, "webAuthToken")?,
        auth_token: member_str(&value, "authToken")?,
        listener_id: member_str(&value, "listenerId")?,
    })
}

pub fn decode_stations(xml: &str) -> Result<Vec<Station>, ProtocolError> {
    let value = parse_response(xml)?;
    value
        .items()
        .ok_or_else(|| ProtocolError::Malformed("station list is not an array".into()))?
        .iter()
        .map(decode_station)
        .collect()
}

pub fn decode_playlist(xml: &str) -> Result<Vec<Song>, ProtocolError> {
    let value = parse_response(xml)?;
    value
        .items()
        .ok_or_else(|| ProtocolError::Malformed("playlist is not an array".into()))?
        .iter()
        .map(decode_song)
        .collect()
}

pub fn decode_search(xml: &str) -> Result<SearchResult, ProtocolError> {
    let value = parse_response(xml)?;
    let artists = value
        .get("artists")
        .and_then(Value::items)
        .unwrap_or_default()
        .iter()
        .map(|artist| {
            Ok(SearchArtist {
                name: member_str(artist, "artistName")?,
                music_id: member_str(artist, "musicId")?,
            })
        })
        .collect::<Result<Vec<_>, ProtocolError>>()?;
    let songs = value
        .get("songs")
        .and_then(Value::items)
        .unwrap_or_default()
        .iter()
        .map(|song| {
            Ok(SearchSong {
                title: member_str(song, "songTitle")?,
                artist: member_str(song, "artistSummary")?,
                music_id: member_str(song, "musicId")?,
            })
        })
        .collect::<Result<Vec<_>, ProtocolError>>()?;
    Ok(SearchResult { artists, songs })
}

pub fn decode_created_station(xml: &str) -> Result<Station, ProtocolError> {
    decode_station(&parse_response(xml)?)
}

/// The add-seed response carries a full replacement record for the station.
pub fn decode_added_seed(xml: &str) -> Result<Station, ProtocolError> {
    decode_station(&parse_response(xml)?)
}

fn decode_station(value: &Value) -> Result<Station, ProtocolError> {
    Ok(Station {
        id: member_str(value, "stationId")?,
        name: member_str(value, "stationName")?,
    })
}

fn decode_song(value: &Value) -> Result<Song, ProtocolError> {
    Ok(Song {
        title: member_str(value, "songTitle")?,
        artist: member_str(value, "artistSummary")?,
        music_id: member_str(value, "musicId")?,
        audio_url: member_str(value, "audioURL")?,
        matching_seed: member_str(value, "matchingSeed")?,
        user_seed: member_str(value, "userSeed")?,
        focus_trait_id: opt_member_str(value, "focusTraitId"),
        rating: Rating::None,
    })
}

fn member_str(value: &Value, name: &str) -> Result<String, ProtocolError> {
    opt_member_str(value, name)
        .ok_or_else(|| ProtocolError::Malformed(format!("missing member {:?}", name)))
}

fn opt_member_str(value: &Value, name: &str) -> Option<String> {
    value.get(name).and_then(Value::as_str).map(str::to_owned)
}
