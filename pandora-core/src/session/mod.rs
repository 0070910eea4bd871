//! Session state and request orchestration.
//!
//! A [`Session`] drives the RPC channel synchronously: every operation builds
//! one XML-RPC document, encrypts it, POSTs it with the plaintext parameter
//! mirrors in the query string, and interprets the parsed result before
//! touching any local state.  Local mutations happen only after the server
//! has confirmed success; a failed call leaves the owned collections exactly
//! as they were.
//!
//! Methods take `&mut self`, so concurrent use of one handle is ruled out at
//! compile time instead of by internal locking.

use std::fmt::Write as _;

use crate::{
    connection::Transport,
    crypt,
    error::Error,
    protocol::{
        decode,
        model::{Rating, SearchResult, Song, Station, UserInfo},
        MethodCall, Param,
    },
    util,
};

// Production RPC endpoints.  Credentials only ever travel to the secure
// variant.
const RPC_ENDPOINT: &str = "http://www.pandora.com/radio/xmlrpc/v6";
const SECURE_RPC_ENDPOINT: &str = "https://www.pandora.com/radio/xmlrpc/v6";

// Catalog and audio-format parameters the playlist endpoint requires
// verbatim.  Kept fixed; nothing suggests the service accepts other values.
const PLAYLIST_CATALOG_ID: &str = "15941546";
const PLAYLIST_CATALOG_REVISION: &str = "181840822";
const PLAYLIST_AUDIO_FORMAT: &str = "aacplus";

/// Configuration values for a session.  The endpoint URLs exist so tests can
/// point a session at a fixture server.
#[derive(Clone)]
pub struct SessionConfig {
    pub rpc_url: String,
    pub secure_rpc_url: String,
    pub proxy_url: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rpc_url: RPC_ENDPOINT.into(),
            secure_rpc_url: SECURE_RPC_ENDPOINT.into(),
            proxy_url: None,
        }
    }
}

/// Handle over the remote service, owning the local snapshot of stations and
/// playlist.  All owned data is dropped with the handle.
pub struct Session {
    transport: Transport,
    config: SessionConfig,
    route_id: String,
    identity: Option<UserInfo>,
    stations: Vec<Station>,
    playlist: Vec<Song>,
}

impl Session {
    /// Create a fresh, unauthenticated session.  Derives the route
    /// identifier once; does no network I/O.
    pub fn new(config: SessionConfig) -> Self {
        let transport = Transport::new(config.proxy_url.as_deref());
        let route_id = util::derive_route_id(util::unix_timestamp());
        Self {
            transport,
            config,
            route_id,
            identity: None,
            stations: Vec::new(),
            playlist: Vec::new(),
        }
    }

    /// Route identifier included in every request URL, stable for the
    /// session's lifetime.
    pub fn route_id(&self) -> &str {
        &self.route_id
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// Current station snapshot.  Invalidated wholesale by the next
    /// [`Session::get_stations`].
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Current playlist snapshot.  Invalidated wholesale by the next
    /// [`Session::get_playlist`].
    pub fn playlist(&self) -> &[Song] {
        &self.playlist
    }

    /// Authenticate the listener.  Runs the `sync` no-op first, whose outcome
    /// the service does not appear to use; any failure there is discarded.
    /// Identity tokens are stored only when authentication succeeds.
    pub fn connect(&mut self, username: &str, password: &str) -> Result<(), Error> {
        let sync = MethodCall::new("misc.sync");
        if let Err(err) = self.send(false, &sync) {
            log::debug!("ignoring sync failure: {}", err);
        }

        let call = MethodCall::new("listener.authenticateListener")
            .param(Param::Int(util::unix_timestamp()))
            .param(Param::Str(username.to_owned()))
            .param(Param::Str(password.to_owned()));
        let body = self.send(true, &call)?;
        let info = decode::decode_user_info(&body)?;
        self.identity = Some(info);
        Ok(())
    }

    /// Fetch all stations of the authenticated listener and replace the
    /// local snapshot wholesale.
    pub fn get_stations(&mut self) -> Result<&[Station], Error> {
        let call = MethodCall::new("station.getStations")
            .param(Param::Int(util::unix_timestamp()))
            .param(Param::Str(self.auth_token().to_owned()));
        let body = self.send(false, &call)?;
        let stations = decode::decode_stations(&body)?;
        self.replace_station_list(stations);
        Ok(&self.stations)
    }

    /// Fetch the next playlist fragment for a station and replace the local
    /// playlist wholesale.
    pub fn get_playlist(&mut self, station_id: &str) -> Result<&[Song], Error> {
        let call = MethodCall::new("playlist.getFragment")
            .param(Param::Int(util::unix_timestamp()))
            .param(Param::Str(self.auth_token().to_owned()))
            .arg(Param::Str(station_id.to_owned()))
            .arg(Param::Str(PLAYLIST_CATALOG_ID.to_owned()))
            .arg(Param::Str(PLAYLIST_CATALOG_REVISION.to_owned()))
            .arg(Param::Str(String::new()))
            .arg(Param::Str(String::new()))
            .arg(Param::Str(PLAYLIST_AUDIO_FORMAT.to_owned()));
        let body = self.send(false, &call)?;
        let playlist = decode::decode_playlist(&body)?;
        self.replace_playlist(playlist);
        Ok(&self.playlist)
    }

    /// Love or ban a song from the current playlist.  `Rating::None` is not
    /// a valid target; the service cannot remove a rating once given, so the
    /// request is rejected here before any network traffic.
    pub fn rate_track(
        &mut self,
        station_id: &str,
        music_id: &str,
        rating: Rating,
    ) -> Result<(), Error> {
        if rating == Rating::None {
            return Err(Error::InvalidRating);
        }
        let song = self
            .playlist
            .iter()
            .find(|song| song.music_id == music_id)
            .ok_or(Error::TrackNotFound)?;

        let call = MethodCall::new("station.addFeedback")
            .param(Param::Int(util::unix_timestamp()))
            .param(Param::Str(self.auth_token().to_owned()))
            .arg(Param::Str(station_id.to_owned()))
            .arg(Param::Str(song.music_id.clone()))
            .arg(Param::Str(song.matching_seed.clone()))
            .arg(Param::Str(song.user_seed.clone()))
            .arg(Param::Str(song.focus_trait_id.clone().unwrap_or_default()))
            .arg(Param::Bool(rating == Rating::Loved))
            .arg(Param::Bool(false));
        let body = self.send(false, &call)?;
        decode::decode_simple(&body)?;

        if let Some(song) = self
            .playlist
            .iter_mut()
            .find(|song| song.music_id == music_id)
        {
            song.rating = rating;
        }
        Ok(())
    }

    /// Rename a station on the server, then locally.  The new name goes out
    /// twice, XML-escaped in the body and URL-escaped in the query string.
    pub fn rename_station(&mut self, station_id: &str, new_name: &str) -> Result<(), Error> {
        let call = MethodCall::new("station.setStationName")
            .param(Param::Int(util::unix_timestamp()))
            .param(Param::Str(self.auth_token().to_owned()))
            .arg(Param::Str(station_id.to_owned()))
            .arg(Param::Str(new_name.to_owned()));
        let body = self.send(false, &call)?;
        decode::decode_simple(&body)?;

        if let Some(station) = self
            .stations
            .iter_mut()
            .find(|station| station.id == station_id)
        {
            station.name = new_name.to_owned();
        }
        Ok(())
    }

    /// Delete a station.  On success exactly one matching local entry is
    /// removed; the rest of the list keeps its order.  Deleting a station
    /// that is not in the local snapshot mutates nothing.
    pub fn delete_station(&mut self, station_id: &str) -> Result<(), Error> {
        let call = MethodCall::new("station.removeStation")
            .param(Param::Int(util::unix_timestamp()))
            .param(Param::Str(self.auth_token().to_owned()))
            .arg(Param::Str(station_id.to_owned()));
        let body = self.send(false, &call)?;
        decode::decode_simple(&body)?;

        if let Some(pos) = self
            .stations
            .iter()
            .position(|station| station.id == station_id)
        {
            self.stations.remove(pos);
        }
        Ok(())
    }

    /// Create a station seeded by a music id obtained from
    /// [`Session::search_music`].  The created station is appended to the
    /// local list.
    pub fn create_station(&mut self, music_id: &str) -> Result<&Station, Error> {
        let call = MethodCall::new("station.createStation")
            .param(Param::Int(util::unix_timestamp()))
            .param(Param::Str(self.auth_token().to_owned()))
            .arg(Param::Str(format!("mi{}", music_id)));
        let body = self.send(false, &call)?;
        let station = decode::decode_created_station(&body)?;

        let index = self.stations.len();
        self.stations.push(station);
        Ok(&self.stations[index])
    }

    /// Add more music to an existing station.  The response carries the
    /// station's new record, which replaces the local one outright instead
    /// of merging seed data.
    pub fn add_music(&mut self, station_id: &str, music_id: &str) -> Result<(), Error> {
        let call = MethodCall::new("station.addSeed")
            .param(Param::Int(util::unix_timestamp()))
            .param(Param::Str(self.auth_token().to_owned()))
            .arg(Param::Str(station_id.to_owned()))
            .arg(Param::Str(music_id.to_owned()));
        let body = self.send(false, &call)?;
        let updated = decode::decode_added_seed(&body)?;

        if let Some(station) = self
            .stations
            .iter_mut()
            .find(|station| station.id == station_id)
        {
            *station = updated;
        }
        Ok(())
    }

    /// Search for artists and songs.  The result is handed to the caller by
    /// value and never retained in the session.
    pub fn search_music(&self, text: &str) -> Result<SearchResult, Error> {
        let call = MethodCall::new("music.search")
            .param(Param::Int(util::unix_timestamp()))
            .param(Param::Str(self.auth_token().to_owned()))
            .arg(Param::Str(text.to_owned()));
        let body = self.send(false, &call)?;
        Ok(decode::decode_search(&body)?)
    }

    /// Install a fresh station snapshot.  The previous one is fully
    /// discarded, never merged.
    fn replace_station_list(&mut self, stations: Vec<Station>) {
        self.stations = stations;
    }

    /// Install a fresh playlist snapshot, discarding the previous one.
    fn replace_playlist(&mut self, playlist: Vec<Song>) {
        self.playlist = playlist;
    }

    /// Unauthenticated calls go out with an empty token and fail remotely,
    /// the same way the service treats a missing token.
    fn auth_token(&self) -> &str {
        self.identity
            .as_ref()
            .map(|identity| identity.auth_token.as_str())
            .unwrap_or("")
    }

    /// One request round-trip: serialize, encrypt, POST, return the raw
    /// response body.
    fn send(&self, secure: bool, call: &MethodCall) -> Result<String, Error> {
        let xml = call.to_xml()?;
        let body = crypt::encrypt_body(&xml);
        let url = self.request_url(secure, call);
        self.transport.post(&url, &body)
    }

    /// Compose `<endpoint>?rid=..[&lid=..]&method=..[&arg1=..&argN=..]`.
    /// The `argN` values are the URL-escaped mirrors of the mirrored body
    /// parameters.
    fn request_url(&self, secure: bool, call: &MethodCall) -> String {
        let endpoint = if secure {
            &self.config.secure_rpc_url
        } else {
            &self.config.rpc_url
        };
        let mut url = format!("{}?rid={}", endpoint, self.route_id);
        if let Some(identity) = &self.identity {
            url.push_str("&lid=");
            url.push_str(&identity.listener_id);
        }
        url.push_str("&method=");
        url.push_str(call.url_method());
        for (index, arg) in call.query_args().iter().enumerate() {
            let _ = write!(url, "&arg{}={}", index + 1, arg);
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Mock, Server, ServerGuard};

    const OK_SIMPLE: &str = "<?xml version=\"1.0\"?><methodResponse><params><param>\
        <value><boolean>1</boolean></value></param></params></methodResponse>";

    const USER_INFO: &str = "<?xml version=\"1.0\"?><methodResponse><params><param>\
        <value><struct>\
        <member><name>webAuthToken</name><value>WAT</value></member>\
        <member><name>authToken</name><value>TOKEN</value></member>\
        <member><name>listenerId</name><value>LID</value></member>\
        </struct></value></param></params></methodResponse>";

    fn fault_response(token: &str) -> String {
        format!(
            "<?xml version=\"1.0\"?><methodResponse><fault><value><struct>\
             <member><name>faultCode</name><value><int>6</int></value></member>\
             <member><name>faultString</name><value>api|123|{}|msg</value></member>\
             </struct></value></fault></methodResponse>",
            token
        )
    }

    fn stations_response(stations: &[(&str, &str)]) -> String {
        let entries: String = stations
            .iter()
            .map(|(id, name)| {
                format!(
                    "<value><struct>\
                     <member><name>stationId</name><value>{}</value></member>\
                     <member><name>stationName</name><value>{}</value></member>\
                     </struct></value>",
                    id, name
                )
            })
            .collect();
        format!(
            "<?xml version=\"1.0\"?><methodResponse><params><param>\
             <value><array><data>{}</data></array></value>\
             </param></params></methodResponse>",
            entries
        )
    }

    fn playlist_response(music_ids: &[&str]) -> String {
        let entries: String = music_ids
            .iter()
            .map(|music_id| {
                format!(
                    "<value><struct>\
                     <member><name>songTitle</name><value>Title {0}</value></member>\
                     <member><name>artistSummary</name><value>Artist {0}</value></member>\
                     <member><name>musicId</name><value>{0}</value></member>\
                     <member><name>audioURL</name><value>http://audio/{0}</value></member>\
                     <member><name>matchingSeed</name><value>ms-{0}</value></member>\
                     <member><name>userSeed</name><value>us-{0}</value></member>\
                     </struct></value>",
                    music_id
                )
            })
            .collect();
        format!(
            "<?xml version=\"1.0\"?><methodResponse><params><param>\
             <value><array><data>{}</data></array></value>\
             </param></params></methodResponse>",
            entries
        )
    }

    fn station_record_response(id: &str, name: &str) -> String {
        format!(
            "<?xml version=\"1.0\"?><methodResponse><params><param>\
             <value><struct>\
             <member><name>stationId</name><value>{}</value></member>\
             <member><name>stationName</name><value>{}</value></member>\
             </struct></value></param></params></methodResponse>",
            id, name
        )
    }

    fn test_session(server: &ServerGuard) -> Session {
        Session::new(SessionConfig {
            rpc_url: format!("{}/xmlrpc", server.url()),
            secure_rpc_url: format!("{}/xmlrpc", server.url()),
            proxy_url: None,
        })
    }

    fn mock_method(server: &mut ServerGuard, method: &str, body: &str) -> Mock {
        server
            .mock("POST", "/xmlrpc")
            .match_query(Matcher::Regex(format!("method={}", method)))
            .with_body(body)
            .create()
    }

    fn load_stations(server: &mut ServerGuard, session: &mut Session, stations: &[(&str, &str)]) {
        let mock = mock_method(server, "getStations", &stations_response(stations));
        session.get_stations().unwrap();
        mock.remove();
    }

    fn load_playlist(server: &mut ServerGuard, session: &mut Session, music_ids: &[&str]) {
        let mock = mock_method(server, "getFragment", &playlist_response(music_ids));
        session.get_playlist("S1").unwrap();
        mock.remove();
    }

    #[test]
    fn test_connect_populates_identity() {
        let mut server = Server::new();
        mock_method(&mut server, "sync", OK_SIMPLE);
        mock_method(&mut server, "authenticateListener", USER_INFO);

        let mut session = test_session(&server);
        assert!(!session.is_authenticated());
        session.connect("user", "pass").unwrap();
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_connect_ignores_sync_failure() {
        let mut server = Server::new();
        server
            .mock("POST", "/xmlrpc")
            .match_query(Matcher::Regex("method=sync".into()))
            .with_status(500)
            .create();
        mock_method(&mut server, "authenticateListener", USER_INFO);

        let mut session = test_session(&server);
        session.connect("user", "pass").unwrap();
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_connect_failure_leaves_identity_empty() {
        let mut server = Server::new();
        mock_method(&mut server, "sync", OK_SIMPLE);
        mock_method(
            &mut server,
            "authenticateListener",
            &fault_response("AUTH_INVALID_USERNAME_PASSWORD"),
        );

        let mut session = test_session(&server);
        let err = session.connect("user", "wrong").unwrap_err();
        assert!(matches!(
            err,
            Error::Fault(crate::protocol::Fault::InvalidLogin)
        ));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_authenticated_requests_carry_listener_id() {
        let mut server = Server::new();
        mock_method(&mut server, "sync", OK_SIMPLE);
        mock_method(&mut server, "authenticateListener", USER_INFO);

        let mut session = test_session(&server);
        session.connect("user", "pass").unwrap();

        let mock = server
            .mock("POST", "/xmlrpc")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("rid".into(), session.route_id().to_string()),
                Matcher::UrlEncoded("lid".into(), "LID".into()),
                Matcher::Regex("method=getStations".into()),
            ]))
            .with_body(stations_response(&[("S1", "Morning")]))
            .create();
        session.get_stations().unwrap();
        mock.assert();
    }

    #[test]
    fn test_get_stations_replaces_snapshot_wholesale() {
        let mut server = Server::new();
        let mut session = test_session(&server);

        load_stations(
            &mut server,
            &mut session,
            &[("S1", "One"), ("S2", "Two"), ("S3", "Three")],
        );
        let ids: Vec<_> = session.stations().iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids, vec!["S1", "S2", "S3"]);

        load_stations(&mut server, &mut session, &[("S4", "Four")]);
        let ids: Vec<_> = session.stations().iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids, vec!["S4"]);
    }

    #[test]
    fn test_get_playlist_replaces_snapshot_wholesale() {
        let mut server = Server::new();
        let mut session = test_session(&server);

        load_playlist(&mut server, &mut session, &["M1", "M2"]);
        assert_eq!(session.playlist().len(), 2);

        load_playlist(&mut server, &mut session, &["M3"]);
        assert_eq!(session.playlist().len(), 1);
        assert_eq!(session.playlist()[0].music_id, "M3");
    }

    #[test]
    fn test_rate_track_mutates_exactly_one_song() {
        let mut server = Server::new();
        let mut session = test_session(&server);
        load_playlist(&mut server, &mut session, &["M1", "M2"]);

        let mock = server
            .mock("POST", "/xmlrpc")
            .match_query(Matcher::AllOf(vec![
                Matcher::Regex("method=addFeedback".into()),
                Matcher::UrlEncoded("arg1".into(), "S1".into()),
                Matcher::UrlEncoded("arg2".into(), "M1".into()),
                Matcher::UrlEncoded("arg3".into(), "ms-M1".into()),
                Matcher::UrlEncoded("arg4".into(), "us-M1".into()),
                Matcher::UrlEncoded("arg6".into(), "true".into()),
                Matcher::UrlEncoded("arg7".into(), "false".into()),
            ]))
            .with_body(OK_SIMPLE)
            .create();
        session.rate_track("S1", "M1", Rating::Loved).unwrap();
        mock.assert();

        assert_eq!(session.playlist()[0].rating, Rating::Loved);
        assert_eq!(session.playlist()[1].rating, Rating::None);
    }

    #[test]
    fn test_rate_none_is_rejected_before_any_network_call() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .with_body(OK_SIMPLE)
            .create();

        let mut session = test_session(&server);
        let err = session.rate_track("S1", "M1", Rating::None).unwrap_err();
        assert!(matches!(err, Error::InvalidRating));
        mock.assert();
    }

    #[test]
    fn test_rate_unknown_track_fails_locally() {
        let server = Server::new();
        let mut session = test_session(&server);
        let err = session.rate_track("S1", "M9", Rating::Banned).unwrap_err();
        assert!(matches!(err, Error::TrackNotFound));
    }

    #[test]
    fn test_rename_station_sends_both_encodings_and_mutates_one() {
        let mut server = Server::new();
        let mut session = test_session(&server);
        load_stations(&mut server, &mut session, &[("S1", "One"), ("S2", "Two")]);

        let mock = server
            .mock("POST", "/xmlrpc")
            .match_query(Matcher::AllOf(vec![
                Matcher::Regex("method=setStationName".into()),
                Matcher::UrlEncoded("arg1".into(), "S2".into()),
                Matcher::UrlEncoded("arg2".into(), "Jazz & Blues".into()),
            ]))
            // Request bodies are hex-encoded ciphertext.
            .match_body(Matcher::Regex("^[0-9a-f]+$".into()))
            .with_body(OK_SIMPLE)
            .create();
        session.rename_station("S2", "Jazz & Blues").unwrap();
        mock.assert();

        assert_eq!(session.stations()[0].name, "One");
        assert_eq!(session.stations()[1].name, "Jazz & Blues");
    }

    #[test]
    fn test_rename_fault_leaves_local_state_untouched() {
        let mut server = Server::new();
        let mut session = test_session(&server);
        load_stations(&mut server, &mut session, &[("S1", "One")]);

        mock_method(
            &mut server,
            "setStationName",
            &fault_response("OUT_OF_SYNC"),
        );
        let err = session.rename_station("S1", "New").unwrap_err();
        assert!(matches!(err, Error::Fault(_)));
        assert_eq!(session.stations()[0].name, "One");
    }

    #[test]
    fn test_delete_station_removes_exactly_one_in_order() {
        let mut server = Server::new();
        let mut session = test_session(&server);
        load_stations(
            &mut server,
            &mut session,
            &[("S1", "One"), ("S2", "Two"), ("S3", "Three")],
        );

        mock_method(&mut server, "removeStation", OK_SIMPLE);
        session.delete_station("S2").unwrap();

        let ids: Vec<_> = session.stations().iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids, vec!["S1", "S3"]);
    }

    #[test]
    fn test_delete_unlisted_station_mutates_nothing() {
        let mut server = Server::new();
        let mut session = test_session(&server);
        load_stations(&mut server, &mut session, &[("S1", "One")]);

        mock_method(&mut server, "removeStation", OK_SIMPLE);
        session.delete_station("S9").unwrap();
        assert_eq!(session.stations().len(), 1);
    }

    #[test]
    fn test_create_station_appends_parsed_record() {
        let mut server = Server::new();
        let mut session = test_session(&server);
        load_stations(&mut server, &mut session, &[("S1", "One")]);

        let mock = server
            .mock("POST", "/xmlrpc")
            .match_query(Matcher::AllOf(vec![
                Matcher::Regex("method=createStation".into()),
                Matcher::UrlEncoded("arg1".into(), "miM7".into()),
            ]))
            .with_body(station_record_response("S7", "Fresh"))
            .create();
        let created = session.create_station("M7").unwrap();
        assert_eq!(created.id, "S7");
        mock.assert();

        let ids: Vec<_> = session.stations().iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids, vec!["S1", "S7"]);
    }

    #[test]
    fn test_add_music_replaces_station_record() {
        let mut server = Server::new();
        let mut session = test_session(&server);
        load_stations(&mut server, &mut session, &[("S1", "One"), ("S2", "Two")]);

        mock_method(
            &mut server,
            "addSeed",
            &station_record_response("S2", "Two Extended"),
        );
        session.add_music("S2", "M5").unwrap();

        assert_eq!(session.stations()[0].name, "One");
        assert_eq!(session.stations()[1].name, "Two Extended");
    }

    #[test]
    fn test_search_result_is_owned_by_the_caller() {
        let mut server = Server::new();
        let session = test_session(&server);

        let body = "<?xml version=\"1.0\"?><methodResponse><params><param>\
            <value><struct>\
            <member><name>artists</name><value><array><data>\
            <value><struct>\
            <member><name>artistName</name><value>Artist A</value></member>\
            <member><name>musicId</name><value>A1</value></member>\
            </struct></value>\
            </data></array></value></member>\
            <member><name>songs</name><value><array><data></data></array></value></member>\
            </struct></value></param></params></methodResponse>";
        mock_method(&mut server, "search", body);

        let result = session.search_music("artist a").unwrap();
        drop(session);
        assert_eq!(result.artists.len(), 1);
        assert_eq!(result.artists[0].music_id, "A1");
    }

    #[test]
    fn test_full_session_round_trip() {
        let mut server = Server::new();
        mock_method(&mut server, "sync", OK_SIMPLE);
        mock_method(&mut server, "authenticateListener", USER_INFO);

        let mut session = test_session(&server);
        session.connect("user", "pass").unwrap();

        load_stations(
            &mut server,
            &mut session,
            &[("S1", "One"), ("S2", "Two"), ("S3", "Three")],
        );
        let ids: Vec<_> = session.stations().iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids, vec!["S1", "S2", "S3"]);

        load_playlist(&mut server, &mut session, &["M1", "M2"]);
        mock_method(&mut server, "addFeedback", OK_SIMPLE);
        session.rate_track("S1", "M1", Rating::Loved).unwrap();
        assert_eq!(session.playlist()[0].rating, Rating::Loved);

        drop(session);
    }

    #[test]
    fn test_route_id_is_stable_for_the_session() {
        let server = Server::new();
        let session = test_session(&server);
        let first = session.route_id().to_string();
        assert!(first.ends_with('P'));
        assert_eq!(session.route_id(), first);
    }
}
