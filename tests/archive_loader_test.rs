/// アーカイブ対応ローダーのテスト
///
/// アーカイブの発見・抽出・ディレクトリ分との統合と、
/// スクリプト本文のルーティングが正しく動作することを確認します。

#[cfg(test)]
mod archive_loader_tests {
    use std::fs::{self, File};
    use std::io::{Read, Write};
    use std::path::Path;

    use bigdecimal::BigDecimal;
    use sediment::core::change::Change;
    use sediment::core::config::ScriptConfig;
    use sediment::core::location::ScriptLocation;
    use sediment::services::archive_aware_loader::ArchiveAwareLoader;
    use sediment::services::MigrationLoader;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::{CompressionMethod, ZipWriter};

    /// テスト用のアーカイブを作成
    fn write_archive(path: &Path, entries: &[(&str, &str)]) {
        let mut writer = ZipWriter::new(File::create(path).unwrap());
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        for (name, body) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    /// scripts/ と archives/ を持つテスト環境を作成
    fn setup() -> (TempDir, ArchiveAwareLoader) {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("scripts")).unwrap();
        fs::create_dir(temp_dir.path().join("archives")).unwrap();
        let loader = ArchiveAwareLoader::new(
            temp_dir.path().join("scripts"),
            temp_dir.path().join("archives"),
            ScriptConfig::default(),
        );
        (temp_dir, loader)
    }

    fn write_script(temp_dir: &TempDir, name: &str, body: &str) {
        fs::write(temp_dir.path().join("scripts").join(name), body).unwrap();
    }

    fn archive_path(temp_dir: &TempDir, name: &str) -> std::path::PathBuf {
        temp_dir.path().join("archives").join(name)
    }

    fn ids(changes: &[Change]) -> Vec<BigDecimal> {
        changes.iter().map(|c| c.id().clone()).collect()
    }

    #[test]
    fn test_merges_and_sorts_across_sources() {
        let (temp_dir, loader) = setup();
        write_script(&temp_dir, "3_create_users.sql", "CREATE TABLE users;");
        write_archive(
            &archive_path(&temp_dir, "com.example.billing_app-1.0.jar"),
            &[
                ("META-INF/migrate/1_init.sql", "CREATE TABLE changelog;"),
                ("META-INF/migrate/4_add_index.sql", "CREATE INDEX idx;"),
                ("com/example/Billing.class", "bytecode"),
            ],
        );
        write_archive(
            &archive_path(&temp_dir, "org.acme.core_app-0.3.jar"),
            &[("META-INF/migrate/2_seed.sql", "INSERT INTO users;")],
        );

        let report = loader.list_migrations().unwrap();
        assert!(report.is_complete());
        assert_eq!(
            ids(&report.changes),
            vec![
                BigDecimal::from(1),
                BigDecimal::from(2),
                BigDecimal::from(3),
                BigDecimal::from(4),
            ]
        );

        assert!(report.changes[0].location().is_archive_entry());
        assert!(report.changes[2].location().is_plain_file());
        assert_eq!(report.changes[0].description(), "init");
        assert_eq!(report.changes[3].description(), "add index");
    }

    #[test]
    fn test_unaccepted_archives_are_not_scanned() {
        let (temp_dir, loader) = setup();
        // マーカー接尾辞を持たないアーカイブは、同梱エントリがあっても対象外
        write_archive(
            &archive_path(&temp_dir, "com.example.thirdparty-1.0.jar"),
            &[("META-INF/migrate/8_should_not_appear.sql", "")],
        );

        let report = loader.list_migrations().unwrap();
        assert!(report.is_complete());
        assert!(report.changes.is_empty());
    }

    #[test]
    fn test_zero_archives_equals_directory_only() {
        let (temp_dir, loader) = setup();
        write_script(&temp_dir, "10_ten.sql", "");
        write_script(&temp_dir, "1_one.sql", "");
        write_script(&temp_dir, "2_two.sql", "");

        let report = loader.list_migrations().unwrap();
        assert!(report.is_complete());

        let mut directory_only = loader.directory().list_migrations().unwrap();
        directory_only.sort_by(|a, b| a.id().cmp(b.id()));
        assert_eq!(report.changes, directory_only);
        assert_eq!(
            ids(&report.changes),
            vec![BigDecimal::from(1), BigDecimal::from(2), BigDecimal::from(10)]
        );
    }

    #[test]
    fn test_rescan_is_idempotent() {
        let (temp_dir, loader) = setup();
        write_script(&temp_dir, "2_two.sql", "");
        write_archive(
            &archive_path(&temp_dir, "com.example.foo_app-1.0.jar"),
            &[("META-INF/migrate/1_init.sql", "")],
        );

        let first = loader.list_migrations().unwrap();
        let second = loader.list_migrations().unwrap();
        assert_eq!(first.changes, second.changes);
    }

    #[test]
    fn test_corrupt_archive_is_skipped_and_reported() {
        let (temp_dir, loader) = setup();
        write_script(&temp_dir, "1_init.sql", "");
        fs::write(
            archive_path(&temp_dir, "com.example.broken_app-1.0.jar"),
            b"this is not a zip archive",
        )
        .unwrap();
        write_archive(
            &archive_path(&temp_dir, "com.example.good_app-1.0.jar"),
            &[("META-INF/migrate/2_seed.sql", "")],
        );

        let report = loader.list_migrations().unwrap();
        assert_eq!(
            ids(&report.changes),
            vec![BigDecimal::from(1), BigDecimal::from(2)]
        );
        assert_eq!(report.skipped_archives.len(), 1);
        assert!(report.skipped_archives[0]
            .archive
            .ends_with("com.example.broken_app-1.0.jar"));
    }

    #[test]
    fn test_unparsable_entry_skips_only_that_archive() {
        let (temp_dir, loader) = setup();
        write_archive(
            &archive_path(&temp_dir, "com.example.bad_app-1.0.jar"),
            &[("META-INF/migrate/oops_no_id.sql", "")],
        );
        write_archive(
            &archive_path(&temp_dir, "com.example.good_app-1.0.jar"),
            &[("META-INF/migrate/1_init.sql", "")],
        );

        let report = loader.list_migrations().unwrap();
        assert_eq!(ids(&report.changes), vec![BigDecimal::from(1)]);
        assert_eq!(report.skipped_archives.len(), 1);
        assert!(report.skipped_archives[0]
            .cause
            .contains("oops_no_id.sql"));
    }

    #[test]
    fn test_directory_entries_in_archive_are_skipped() {
        let (temp_dir, loader) = setup();
        let path = archive_path(&temp_dir, "com.example.foo_app-1.0.jar");
        let mut writer = ZipWriter::new(File::create(&path).unwrap());
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        writer.add_directory("META-INF/migrate/", options).unwrap();
        writer
            .start_file("META-INF/migrate/1_init.sql", options)
            .unwrap();
        writer.write_all(b"CREATE TABLE changelog;").unwrap();
        writer.finish().unwrap();

        let report = loader.list_migrations().unwrap();
        assert_eq!(report.count(), 1);
        assert_eq!(report.changes[0].description(), "init");
    }

    #[test]
    fn test_nested_entry_uses_last_path_segment() {
        let (temp_dir, loader) = setup();
        write_archive(
            &archive_path(&temp_dir, "com.example.foo_app-1.0.jar"),
            &[("META-INF/migrate/v2/7_nested_change.sql", "")],
        );

        let report = loader.list_migrations().unwrap();
        assert_eq!(report.count(), 1);
        assert_eq!(report.changes[0].id(), &BigDecimal::from(7));
        assert_eq!(report.changes[0].description(), "nested change");
    }

    #[test]
    fn test_content_routing_by_location() {
        let (temp_dir, loader) = setup();
        write_script(&temp_dir, "3_create_users.sql", "CREATE TABLE users;");
        write_archive(
            &archive_path(&temp_dir, "com.example.foo_app-1.0.jar"),
            &[("META-INF/migrate/1_init.sql", "CREATE TABLE changelog;")],
        );

        let report = loader.list_migrations().unwrap();

        let mut from_archive = String::new();
        loader
            .open_script(&report.changes[0], false)
            .unwrap()
            .read_to_string(&mut from_archive)
            .unwrap();
        assert_eq!(from_archive, "CREATE TABLE changelog;");

        let mut from_file = String::new();
        loader
            .open_script(&report.changes[1], false)
            .unwrap()
            .read_to_string(&mut from_file)
            .unwrap();
        assert_eq!(from_file, "CREATE TABLE users;");
    }

    #[test]
    fn test_composite_identifier_round_trip() {
        let (temp_dir, loader) = setup();
        write_archive(
            &archive_path(&temp_dir, "com.example.foo_app-1.0.jar"),
            &[("META-INF/migrate/1_init.sql", "")],
        );

        let report = loader.list_migrations().unwrap();
        let identifier = report.changes[0].identifier();
        assert!(identifier.contains('!'));
        assert!(identifier.ends_with("META-INF/migrate/1_init.sql"));
        assert_eq!(
            ScriptLocation::parse(&identifier),
            *report.changes[0].location()
        );
    }

    #[test]
    fn test_entry_not_found_is_reported() {
        let (temp_dir, loader) = setup();
        let path = archive_path(&temp_dir, "com.example.foo_app-1.0.jar");
        write_archive(&path, &[("META-INF/migrate/1_init.sql", "")]);

        let location = ScriptLocation::archive_entry(&path, "META-INF/migrate/9_missing.sql");
        let change = Change::from_filename("9_missing.sql", location).unwrap();

        let error = loader.open_script(&change, false).unwrap_err();
        assert!(error.is_entry_not_found());
    }

    #[test]
    fn test_missing_archive_is_reported() {
        let (temp_dir, loader) = setup();
        let gone = archive_path(&temp_dir, "com.example.gone_app-1.0.jar");
        let location = ScriptLocation::archive_entry(&gone, "META-INF/migrate/1_init.sql");
        let change = Change::from_filename("1_init.sql", location).unwrap();

        let error = loader.open_script(&change, false).unwrap_err();
        assert!(error.is_archive());
    }

    #[test]
    fn test_loader_usable_through_trait() {
        fn scan(loader: &dyn MigrationLoader) -> usize {
            loader.list_migrations().unwrap().count()
        }

        let (temp_dir, loader) = setup();
        write_script(&temp_dir, "1_init.sql", "");
        write_archive(
            &archive_path(&temp_dir, "com.example.foo_app-1.0.jar"),
            &[("META-INF/migrate/2_seed.sql", "")],
        );

        assert_eq!(scan(&loader), 2);
        assert_eq!(scan(loader.directory()), 1);
    }
}
