mod common;

mod tests {
    use underglow_composer::color::{BrightnessRange, Rgb};
    use underglow_composer::status::{
        BLEND_MAX, FADE_IN_TICKS, FADE_OUT_TICKS, HOLD_UNTIL_TICKS, IndicatorLayout,
        OVERLAY_TICKS, PixelList, StatusOverlay, StatusPalette, blend_factor, overlay_expired,
    };
    use underglow_composer::{
        HidIndicators, PeripheralBattery, ProfileStatus, Transport, UsbConnState,
    };

    use crate::common::MockSource;

    const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    const RED: Rgb = Rgb { r: 100, g: 0, b: 0 };
    const GREEN: Rgb = Rgb { r: 0, g: 100, b: 0 };
    const WHITE: Rgb = Rgb { r: 100, g: 100, b: 100 };

    fn pixels(addresses: &[u8]) -> PixelList {
        PixelList::from_slice(addresses).unwrap()
    }

    fn overlay(layout: IndicatorLayout) -> StatusOverlay<8> {
        StatusOverlay::new(Some(layout), BrightnessRange::FULL)
    }

    #[test]
    fn test_blend_timeline() {
        assert_eq!(FADE_IN_TICKS, 20);
        assert_eq!(HOLD_UNTIL_TICKS, 320);
        assert_eq!(FADE_OUT_TICKS, 80);
        assert_eq!(OVERLAY_TICKS, 400);

        assert_eq!(blend_factor(0), 0);
        assert_eq!(blend_factor(10), 128);
        assert_eq!(blend_factor(20), BLEND_MAX);
        assert_eq!(blend_factor(320), BLEND_MAX);
        assert_eq!(blend_factor(360), 128);
        assert_eq!(blend_factor(400), 0);
        assert_eq!(blend_factor(450), 0);
    }

    #[test]
    fn test_overlay_expires_after_400_ticks() {
        assert!(!overlay_expired(400));
        assert!(overlay_expired(401));
    }

    #[test]
    fn test_battery_gauge_fills_from_bottom() {
        let mut overlay = overlay(IndicatorLayout {
            battery: pixels(&[0, 1, 2, 3, 4]),
            ..IndicatorLayout::default()
        });
        let mut source = MockSource::default();

        source.battery = 60;
        overlay.render(&source, FADE_IN_TICKS);
        assert_eq!(&overlay.pixels()[..5], &[GREEN, GREEN, GREEN, BLACK, BLACK]);

        source.battery = 15;
        overlay.render(&source, FADE_IN_TICKS);
        assert_eq!(&overlay.pixels()[..5], &[RED, BLACK, BLACK, BLACK, BLACK]);
    }

    #[test]
    fn test_single_pixel_gauge_always_lit() {
        let mut overlay = overlay(IndicatorLayout {
            battery: pixels(&[3]),
            ..IndicatorLayout::default()
        });
        let mut source = MockSource::default();
        source.battery = 0;

        overlay.render(&source, 0);
        assert_eq!(overlay.pixels()[3], RED);
    }

    #[test]
    fn test_peripheral_battery() {
        let mut overlay = overlay(IndicatorLayout {
            peripheral_battery: pixels(&[5, 6]),
            ..IndicatorLayout::default()
        });
        let mut source = MockSource::default();

        source.peripheral = PeripheralBattery::NotConnected;
        overlay.render(&source, 0);
        assert_eq!(&overlay.pixels()[5..7], &[RED, RED]);

        source.peripheral = PeripheralBattery::Level(30);
        overlay.render(&source, 0);
        let yellow = overlay.palette().yellow;
        assert_eq!(&overlay.pixels()[5..7], &[yellow, BLACK]);

        source.peripheral = PeripheralBattery::Unavailable;
        overlay.render(&source, 0);
        assert_eq!(&overlay.pixels()[5..7], &[BLACK, BLACK]);
    }

    #[test]
    fn test_lock_and_layer_indicators() {
        let mut overlay = overlay(IndicatorLayout {
            layers: pixels(&[0, 1, 2]),
            caps_lock: Some(4),
            num_lock: Some(5),
            scroll_lock: Some(6),
            ..IndicatorLayout::default()
        });
        let mut source = MockSource::default();
        source.hid = HidIndicators(HidIndicators::CAPS_LOCK | HidIndicators::SCROLL_LOCK);
        source.layers = 0b101;

        overlay.render(&source, 0);
        let magenta = overlay.palette().magenta;
        assert_eq!(&overlay.pixels()[..3], &[magenta, BLACK, magenta]);
        assert_eq!(&overlay.pixels()[4..7], &[RED, BLACK, RED]);
    }

    #[test]
    fn test_output_fallback() {
        let mut overlay = overlay(IndicatorLayout {
            output_fallback: Some(7),
            ..IndicatorLayout::default()
        });
        let mut source = MockSource::default();

        overlay.render(&source, 0);
        assert_eq!(overlay.pixels()[7], BLACK);

        source.preferred_active = false;
        overlay.render(&source, 0);
        assert_eq!(overlay.pixels()[7], RED);
    }

    #[test]
    fn test_profile_indicators() {
        let mut overlay = overlay(IndicatorLayout {
            profiles: pixels(&[0, 1, 2]),
            ..IndicatorLayout::default()
        });
        let mut source = MockSource::default();
        source.transport = Transport::Ble;
        source.active_profile = 1;
        source.profiles = vec![
            ProfileStatus::Connected,
            ProfileStatus::Connected,
            ProfileStatus::Paired,
            ProfileStatus::Unused,
        ];

        overlay.render(&source, 0);
        let palette = *overlay.palette();
        assert_eq!(
            &overlay.pixels()[..4],
            &[palette.dull_green, WHITE, RED, BLACK]
        );
    }

    #[test]
    fn test_profile_count_bounds_drawing() {
        let mut overlay = overlay(IndicatorLayout {
            profiles: pixels(&[0, 1, 2]),
            ..IndicatorLayout::default()
        });
        let mut source = MockSource::default();
        source.profiles = vec![ProfileStatus::Unused];

        overlay.render(&source, 0);
        let lilac = overlay.palette().lilac;
        assert_eq!(&overlay.pixels()[..3], &[lilac, BLACK, BLACK]);
    }

    #[test]
    fn test_usb_indicator() {
        let mut overlay = overlay(IndicatorLayout {
            usb: Some(2),
            ..IndicatorLayout::default()
        });
        let mut source = MockSource::default();

        overlay.render(&source, 0);
        assert_eq!(overlay.pixels()[2], WHITE);

        source.transport = Transport::Ble;
        overlay.render(&source, 0);
        assert_eq!(overlay.pixels()[2], overlay.palette().dull_green);

        source.usb = UsbConnState::Powered;
        overlay.render(&source, 0);
        assert_eq!(overlay.pixels()[2], RED);

        source.usb = UsbConnState::None;
        overlay.render(&source, 0);
        assert_eq!(overlay.pixels()[2], Rgb::new(41, 12, 80));
    }

    #[test]
    fn test_addresses_outside_strip_ignored() {
        let mut overlay = overlay(IndicatorLayout {
            battery: pixels(&[0, 200]),
            usb: Some(8),
            ..IndicatorLayout::default()
        });
        let source = MockSource::default();

        assert_eq!(overlay.render(&source, FADE_IN_TICKS), BLEND_MAX);
        assert_eq!(overlay.pixels()[0], GREEN);
    }

    #[test]
    fn test_no_layout_stays_dark() {
        let mut overlay = StatusOverlay::<8>::new(None, BrightnessRange::FULL);
        let source = MockSource::default();

        assert_eq!(overlay.render(&source, FADE_IN_TICKS), 0);
        assert_eq!(overlay.pixels(), &[BLACK; 8]);
    }

    #[test]
    fn test_palette_scaled_by_max_brightness() {
        let palette = StatusPalette::new(50);
        assert_eq!(palette.red, Rgb::new(50, 0, 0));
        assert_eq!(palette.white, Rgb::new(50, 50, 50));
        assert_eq!(palette.battery(41), palette.green);
        assert_eq!(palette.battery(40), palette.yellow);
        assert_eq!(palette.battery(20), palette.red);
    }
}
