use crate::app::ClickerApp;
use crate::settings::{ClickButton, Digit, Modifier};
use egui::{ComboBox, Grid, TextEdit};
use std::time::Duration;

impl eframe::App for ClickerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        if ctx.input(|i| i.viewport().close_requested()) {
            self.shutdown();
        }

        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.heading("Mouse Clicker");
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let current = self.settings.get();

            ui.group(|ui| {
                ui.label("Settings (saved automatically)");
                Grid::new("settings")
                    .num_columns(2)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Click interval (ms):");
                        let resp = ui.add(
                            TextEdit::singleline(&mut self.interval_input).desired_width(120.0),
                        );
                        if resp.lost_focus() {
                            self.apply_text_fields();
                        }
                        ui.end_row();

                        ui.label("Click count (0 = unlimited):");
                        let resp = ui.add(
                            TextEdit::singleline(&mut self.count_input).desired_width(120.0),
                        );
                        if resp.lost_focus() {
                            self.apply_text_fields();
                        }
                        ui.end_row();

                        ui.label("Mouse button:");
                        let mut button = current.button;
                        ComboBox::from_id_source("button")
                            .selected_text(button.label())
                            .show_ui(ui, |ui| {
                                for b in ClickButton::ALL {
                                    ui.selectable_value(&mut button, b, b.label());
                                }
                            });
                        if button != current.button {
                            self.select_button(button);
                        }
                        ui.end_row();

                        ui.label("Modifier key:");
                        let mut modifier = current.modifier;
                        ComboBox::from_id_source("modifier")
                            .selected_text(modifier.label())
                            .show_ui(ui, |ui| {
                                for m in Modifier::ALL {
                                    ui.selectable_value(&mut modifier, m, m.label());
                                }
                            });
                        if modifier != current.modifier {
                            self.select_modifier(modifier);
                        }
                        ui.end_row();

                        ui.label("Number key:");
                        let mut number = current.number;
                        ComboBox::from_id_source("number")
                            .selected_text(number.to_string())
                            .show_ui(ui, |ui| {
                                for d in Digit::all() {
                                    ui.selectable_value(&mut number, d, d.to_string());
                                }
                            });
                        if number != current.number {
                            self.select_number(number);
                        }
                        ui.end_row();
                    });
            });

            ui.add_space(8.0);
            ui.group(|ui| {
                ui.label("Status");
                ui.label(self.status.as_str());
            });
        });

        // Keep draining worker updates while the window is idle.
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
