#![cfg(feature = "std")]

mod support;

mod tests {
    use embassy_time::Instant;
    use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
    use embedded_graphics::prelude::Point;
    use lovebyte_composer::color::{BANNER_PINK, Rgb, WHITE};
    use lovebyte_composer::error::TransportError;
    use lovebyte_composer::orchestrator::{BANNER_TEXT, DECODE_FAILED_TEXT, DOWNLOAD_FAILED_TEXT, NOT_FOUND_TEXT};
    use lovebyte_composer::{
        AssetName, DecodeError, Endpoint, LedMode, NotificationEvent, NotifyError, Orchestrator,
        Peripherals, PlaybackState,
    };

    use crate::support::{
        MemStorage, MockTransport, RED, RawStillDecoder, RecordingDelay, RecordingLed,
        RecordingSurface, TestBoard, raw_still, two_frame_gif,
    };

    type Device = Orchestrator<TestBoard, 320>;

    fn ms(value: u64) -> Instant {
        Instant::from_millis(value)
    }

    fn device(storage: MemStorage, transport: MockTransport) -> Device {
        Orchestrator::new(
            Peripherals {
                storage,
                transport,
                surface: RecordingSurface::new(320, 240),
                delay: RecordingDelay::default(),
                led: RecordingLed::default(),
                still: RawStillDecoder,
            },
            ms(0),
        )
    }

    fn with_files(files: &[(&str, Vec<u8>)]) -> Device {
        let mut storage = MemStorage::default();
        for (path, bytes) in files {
            storage.files.insert((*path).to_string(), bytes.clone());
        }
        device(storage, MockTransport::default())
    }

    #[test]
    fn test_display_animation_starts_session() {
        let mut device = with_files(&[("/images/a.gif", two_frame_gif())]);
        device.display("a.gif", ms(0)).unwrap();

        assert_eq!(device.playback().state(), PlaybackState::Playing);
        assert_eq!(
            device.playback().active_asset(),
            Some(&AssetName::new("a.gif").unwrap())
        );

        device.tick(ms(0));
        assert_eq!(device.surface().pixel(159, 119), RED);
    }

    #[test]
    fn test_display_same_animation_twice_is_a_no_op() {
        let mut device = with_files(&[("/images/a.gif", two_frame_gif())]);
        device.display("a.gif", ms(0)).unwrap();
        let clears = device.surface().clears;

        device.display("a.gif", ms(10)).unwrap();
        let stats = device.playback().stats();
        assert_eq!(stats.buffers_allocated, 1);
        assert_eq!(stats.decoder_opens, 1);
        assert_eq!(device.surface().clears, clears);
    }

    #[test]
    fn test_display_missing_image() {
        let mut device = with_files(&[]);
        assert_eq!(device.display("missing.jpg", ms(0)), Err(NotifyError::NotFound));
        assert_eq!(device.surface().last_text(), Some(NOT_FOUND_TEXT));
        assert_eq!(device.delay().calls_ms, vec![900]);
        assert_eq!(device.playback().state(), PlaybackState::Idle);
    }

    #[test]
    fn test_display_invalid_name() {
        let mut device = with_files(&[]);
        assert_eq!(device.display("../x.gif", ms(0)), Err(NotifyError::InvalidName));
        assert_eq!(device.surface().last_text(), Some(NOT_FOUND_TEXT));
    }

    #[test]
    fn test_display_corrupt_animation() {
        let mut device = with_files(&[("/images/bad.gif", b"GIF89a garbage".to_vec())]);
        assert!(matches!(
            device.display("bad.gif", ms(0)),
            Err(NotifyError::Decode(_))
        ));
        assert_eq!(device.surface().last_text(), Some(DECODE_FAILED_TEXT));
        assert_eq!(device.playback().state(), PlaybackState::Idle);
        assert_eq!(device.playback().stats().live_buffers, 0);
    }

    #[test]
    fn test_display_still_stops_playback_and_draws_at_origin() {
        let mut device = with_files(&[
            ("/images/a.gif", two_frame_gif()),
            ("/images/photo.jpg", raw_still(3, 2, [255, 0, 0])),
        ]);
        device.display("a.gif", ms(0)).unwrap();
        device.display("photo.jpg", ms(5)).unwrap();

        assert_eq!(device.playback().state(), PlaybackState::Idle);
        assert_eq!(device.surface().pixel(0, 0), RED);
        assert_eq!(device.surface().pixel(2, 1), RED);
        assert_eq!(device.surface().pixel(3, 0), Rgb565::BLACK);
    }

    #[test]
    fn test_display_corrupt_still() {
        let mut device = with_files(&[("/images/photo.jpg", vec![4, 4, 1])]);
        assert_eq!(
            device.display("photo.jpg", ms(0)),
            Err(NotifyError::Decode(DecodeError::Truncated))
        );
        assert_eq!(device.surface().last_text(), Some(DECODE_FAILED_TEXT));
    }

    #[test]
    fn test_receive_downloads_announces_and_plays() {
        let transport = MockTransport::serving(
            "http://server:6969/images/x.gif",
            200,
            two_frame_gif(),
        );
        let mut device = device(MemStorage::default(), transport);

        device.receive("x.gif", &Endpoint::new("server"), ms(0)).unwrap();

        let (origin, text, style) = &device.surface().texts[0];
        assert_eq!(text, BANNER_TEXT);
        assert_eq!(*origin, Point::new(70, 108));
        assert_eq!(style.color, BANNER_PINK);
        assert_eq!(device.delay().calls_ms, vec![5, 500]);
        assert_eq!(device.playback().state(), PlaybackState::Playing);
        assert!(device.storage().files.contains_key("/images/x.gif"));
    }

    #[test]
    fn test_receive_from_unreachable_server() {
        let mut device = with_files(&[("/images/a.gif", two_frame_gif())]);
        device.display("a.gif", ms(0)).unwrap();

        assert_eq!(
            device.receive("x.gif", &Endpoint::new("nowhere"), ms(10)),
            Err(NotifyError::Transport(TransportError::Connect))
        );
        assert_eq!(device.surface().last_text(), Some(DOWNLOAD_FAILED_TEXT));
        assert_eq!(device.delay().calls_ms, vec![5, 1200]);
        assert_eq!(device.playback().state(), PlaybackState::Idle);
        assert_eq!(device.playback().active_asset(), None);
    }

    #[test]
    fn test_receive_http_error() {
        let transport = MockTransport::serving("http://server:6969/images/x.jpg", 500, Vec::new());
        let mut device = device(MemStorage::default(), transport);
        assert_eq!(
            device.receive("x.jpg", &Endpoint::new("server"), ms(0)),
            Err(NotifyError::Transport(TransportError::Status(500)))
        );
        assert_eq!(device.surface().last_text(), Some(DOWNLOAD_FAILED_TEXT));
    }

    #[test]
    fn test_message_sets_led_and_shows_text() {
        let mut device = with_files(&[("/images/a.gif", two_frame_gif())]);
        device.display("a.gif", ms(0)).unwrap();

        let event = NotificationEvent {
            text: "Hi".into(),
            sender: "Sam".into(),
            led_color: 0x0000FF,
            use_led_color: true,
            ..NotificationEvent::default()
        };
        device.on_message(&event, ms(10));

        assert_eq!(device.led().mode(), LedMode::StaticColor);
        assert_eq!(device.led().driver().last(), Some(Rgb::new(0, 0, 255)));
        assert_eq!(device.playback().state(), PlaybackState::Idle);
        assert!(device.surface().last_text().unwrap().starts_with("Sam\nHi\n"));
    }

    #[test]
    fn test_message_is_announced_by_banner() {
        let mut device = with_files(&[]);
        let event = NotificationEvent {
            text: "Hi".into(),
            sender: "Sam".into(),
            ..NotificationEvent::default()
        };
        device.on_message(&event, ms(0));

        let texts = &device.surface().texts;
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[0].1, BANNER_TEXT);
        assert_eq!(texts[0].2.color, BANNER_PINK);
        assert!(texts[1].1.starts_with("Sam\nHi\n"));
        assert_eq!(device.delay().calls_ms, vec![500]);
    }

    #[test]
    fn test_message_heartbeat_runs_through_ticks() {
        let mut device = with_files(&[]);
        let event = NotificationEvent {
            heartbeat_color: 0xFF0055,
            use_heartbeat: true,
            heartbeat_pulses: 1,
            ..NotificationEvent::default()
        };
        device.on_message(&event, ms(0));
        assert!(device.led().is_heartbeat_active());

        device.tick(ms(80));
        assert_eq!(device.led().driver().last(), Some(Rgb::new(255, 0, 85)));
        device.tick(ms(160));
        device.tick(ms(161));
        assert!(!device.led().is_heartbeat_active());
        assert_eq!(device.led().driver().last(), Some(WHITE));
    }

    #[test]
    fn test_list_and_clear_assets() {
        let mut device = with_files(&[
            ("/images/b.gif", two_frame_gif()),
            ("/images/a.jpg", raw_still(1, 1, [0, 0, 0])),
            ("/images/notes.txt", vec![1]),
        ]);
        assert_eq!(device.list_assets().unwrap(), vec!["a.jpg", "b.gif"]);

        device.display("b.gif", ms(0)).unwrap();
        assert_eq!(device.clear_assets().unwrap(), 2);
        assert_eq!(device.playback().state(), PlaybackState::Idle);
        assert!(device.list_assets().unwrap().is_empty());
        assert!(device.storage().files.contains_key("/images/notes.txt"));
    }
}
