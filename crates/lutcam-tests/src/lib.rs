//! Integration tests for lutcam crates.
//!
//! End-to-end scenarios: `.cube` files on disk through the loader and the
//! transform engine, and commands arriving over a link session.

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use lutcam_core::RgbFrame;
    use lutcam_link::{CommandLink, LinkEvent, LinkResult, Notifier, ServiceInfo, Session, StatusChange};
    use lutcam_lut::{cube, Lut3D, LutCache, LutError, ParseMode};
    use lutcam_ops::{apply_lut_file, apply_lut_file_cached, FilterOptions, OpsError, OutputMode};
    use tempfile::tempdir;

    /// Deterministic test frame.
    fn frame_bytes(width: u32, height: u32) -> Vec<u8> {
        (0..width * height * 3)
            .map(|i| ((i * 73 + 19) % 256) as u8)
            .collect()
    }

    fn write_identity(path: &Path, size: usize) {
        cube::write(path, &Lut3D::identity(size)).expect("Failed to write LUT");
    }

    #[test]
    fn test_identity_file_gives_average() {
        let dir = tempdir().unwrap();
        let lut = dir.path().join("identity.cube");
        write_identity(&lut, 33);

        let (w, h) = (40, 30);
        let original = frame_bytes(w, h);
        let mut bytes = original.clone();
        let stats = apply_lut_file(&mut bytes, w, h, &lut, &FilterOptions::default()).unwrap();
        assert_eq!(stats.processed, (w * h) as usize);
        assert_eq!(stats.skipped, 0);

        for (src, dst) in original.chunks(3).zip(bytes.chunks(3)) {
            let avg = src.iter().map(|&v| v as f32).sum::<f32>() / 3.0;
            assert!(dst[0] == dst[1] && dst[1] == dst[2]);
            assert!((dst[0] as f32 - avg).abs() <= 1.0, "{src:?} -> {dst:?}");
        }
    }

    #[test]
    fn test_identity_file_color_mode() {
        let dir = tempdir().unwrap();
        let lut = dir.path().join("identity.cube");
        write_identity(&lut, 17);

        let original = frame_bytes(16, 16);
        let mut bytes = original.clone();
        let opts = FilterOptions::default().with_mode(OutputMode::Color);
        apply_lut_file(&mut bytes, 16, 16, &lut, &opts).unwrap();

        for (a, b) in original.iter().zip(&bytes) {
            assert!(a.abs_diff(*b) <= 1);
        }
    }

    #[test]
    fn test_oversized_declaration_clamped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("big.cube");
        fs::write(&path, "# huge\nLUT_3D_SIZE 64\n0.5 0.5 0.5\n").unwrap();

        let report = cube::load_with(&path, ParseMode::Tolerant).unwrap();
        assert_eq!(report.lut.size(), 33);
        assert_eq!(report.declared_size, Some(64));
        assert!(report.was_clamped());
        assert!(report.is_partial());

        // still usable: black everywhere except the first corner
        let mut bytes = vec![0u8, 0, 0, 255, 255, 255];
        apply_lut_file(&mut bytes, 2, 1, &path, &FilterOptions::default()).unwrap();
        assert_eq!(bytes, [127, 127, 127, 0, 0, 0]);
    }

    #[test]
    fn test_missing_lut_leaves_buffer() {
        let dir = tempdir().unwrap();
        let original = frame_bytes(4, 4);
        let mut bytes = original.clone();

        let err = apply_lut_file(&mut bytes, 4, 4, dir.path().join("gone.cube"), &FilterOptions::default())
            .unwrap_err();
        assert!(matches!(err, OpsError::Lut(ref e) if e.is_unavailable()));
        assert_eq!(bytes, original);
    }

    #[test]
    fn test_lut_without_size_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nosize.cube");
        fs::write(&path, "# no header\n0 0 0\n1 1 1\n").unwrap();

        let original = frame_bytes(2, 2);
        let mut bytes = original.clone();
        let err = apply_lut_file(&mut bytes, 2, 2, &path, &FilterOptions::default()).unwrap_err();
        assert!(matches!(err, OpsError::Lut(LutError::DegenerateLut)));
        assert_eq!(bytes, original);
    }

    #[test]
    fn test_strict_mode_rejects_malformed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.cube");
        let mut text = String::from("LUT_3D_SIZE 2\n");
        for i in 0..8 {
            if i == 3 {
                // scans as 0 0 0 but is still malformed
                text.push_str("0 oops\n");
                continue;
            }
            let v = if i == 7 { 1.0 } else { 0.0 };
            text.push_str(&format!("{v} {v} {v}\n"));
        }
        fs::write(&path, text).unwrap();

        let mut bytes = vec![255u8; 3];
        apply_lut_file(&mut bytes, 1, 1, &path, &FilterOptions::default()).unwrap();
        assert_eq!(bytes, [255, 255, 255]);

        let strict = FilterOptions::default().with_parse(ParseMode::Strict);
        let err = apply_lut_file(&mut bytes, 1, 1, &path, &strict).unwrap_err();
        assert!(matches!(err, OpsError::Lut(LutError::Malformed { .. })));
    }

    #[test]
    fn test_short_buffer_through_file() {
        let dir = tempdir().unwrap();
        let lut = dir.path().join("identity.cube");
        write_identity(&lut, 2);

        // 3x2 frame but only 4 whole pixels plus one stray byte
        let mut bytes = vec![200u8; 13];
        let stats = apply_lut_file(&mut bytes, 3, 2, &lut, &FilterOptions::default()).unwrap();
        assert_eq!(stats.processed, 4);
        assert_eq!(stats.skipped, 2);
        assert_eq!(bytes[12], 200);
    }

    #[test]
    fn test_cached_matches_uncached() {
        let dir = tempdir().unwrap();
        let lut = dir.path().join("identity.cube");
        write_identity(&lut, 9);
        let cache = LutCache::new();
        let opts = FilterOptions::default();

        let mut a = frame_bytes(8, 8);
        let mut b = a.clone();
        apply_lut_file(&mut a, 8, 8, &lut, &opts).unwrap();
        apply_lut_file_cached(&mut b, 8, 8, &lut, &cache, &opts).unwrap();
        assert_eq!(a, b);

        let mut c = frame_bytes(8, 8);
        apply_lut_file_cached(&mut c, 8, 8, &lut, &cache, &opts).unwrap();
        assert_eq!(a, c);
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn test_frame_center_after_apply() {
        let dir = tempdir().unwrap();
        let lut = dir.path().join("identity.cube");
        write_identity(&lut, 33);

        let mut bytes = vec![0u8; 5 * 5 * 3];
        let center = (2 * 5 + 2) * 3;
        bytes[center..center + 3].copy_from_slice(&[30, 60, 90]);
        apply_lut_file(&mut bytes, 5, 5, &lut, &FilterOptions::default()).unwrap();

        let frame = RgbFrame::new(&mut bytes, 5, 5);
        let (x, y, rgb) = frame.center_pixel().unwrap();
        assert_eq!((x, y), (2, 2));
        assert!(rgb[0].abs_diff(60) <= 1);
    }

    /// Grades a shared frame whenever the `apply` command arrives.
    struct Grader {
        frame: Arc<Mutex<Vec<u8>>>,
        lut: std::path::PathBuf,
    }

    impl lutcam_link::CommandHandler for Grader {
        fn handle(&mut self, command: &str, notifier: &Notifier) {
            if command != "apply" {
                let _ = notifier.notify("unknown command");
                return;
            }
            let mut frame = self.frame.lock().unwrap();
            let reply = match apply_lut_file(&mut frame, 2, 2, &self.lut, &FilterOptions::default()) {
                Ok(_) => "LUT applied",
                Err(_) => "LUT failed",
            };
            let _ = notifier.notify(reply);
        }
    }

    #[test]
    fn test_command_session_end_to_end() {
        let dir = tempdir().unwrap();
        let lut = dir.path().join("identity.cube");
        write_identity(&lut, 5);

        let frame = Arc::new(Mutex::new(vec![90u8, 0, 0, 0, 90, 0, 0, 0, 90, 30, 30, 30]));
        let mut link = CommandLink::new(Grader {
            frame: frame.clone(),
            lut: lut.clone(),
        });

        let sent = Arc::new(Mutex::new(Vec::<String>::new()));
        let mut session = Session::with_window(ServiceInfo::default(), Duration::from_secs(60));
        session.start();
        let sink = sent.clone();
        session.notifier().subscribe(Arc::new(move |payload: &str| -> LinkResult<()> {
            sink.lock().unwrap().push(payload.to_string());
            Ok(())
        }));

        session.dispatch(&mut link, LinkEvent::Connect);
        assert_eq!(session.poll_status(), StatusChange::Connected);

        session.dispatch(&mut link, LinkEvent::Write(b"apply\n".to_vec()));
        // second identical reply falls inside the window
        session.dispatch(&mut link, LinkEvent::Write(b"apply".to_vec()));
        session.dispatch(&mut link, LinkEvent::Write(b"reboot".to_vec()));

        assert_eq!(link.received(), 3);
        assert_eq!(*sent.lock().unwrap(), ["LUT applied", "unknown command"]);
        assert!(frame.lock().unwrap().chunks(3).all(|p| p[0] == p[1] && p[1] == p[2]));

        session.dispatch(&mut link, LinkEvent::Disconnect);
        assert_eq!(session.poll_status(), StatusChange::Dropped);
    }
}
