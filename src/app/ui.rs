use super::{DocumentPortal, UploadStatus};
use crate::utils::color::Palette;
use egui::{Align, RichText};

impl DocumentPortal {
    pub fn render(&mut self, ctx: &egui::Context) {
        let palette = Palette::portal();

        egui::CentralPanel::default().show(ctx, |ui| {
            let footer_height = 30.0;
            let content_height = ui.available_height() - footer_height;

            egui::ScrollArea::vertical()
                .max_height(content_height)
                .show(ui, |ui| {
                    ui.add_space(20.0);
                    ui.vertical_centered(|ui| {
                        ui.heading("Intelligent Document Insights Portal");
                        ui.add_space(5.0);
                        ui.label(
                            RichText::new("Upload a document to have it analysed")
                                .color(ui.visuals().text_color().gamma_multiply(0.7)),
                        );
                    });

                    ui.add_space(20.0);
                    self.render_picker(ui, &palette);

                    if self.session.is_uploading() {
                        ui.add_space(10.0);
                        let progress_bar = egui::ProgressBar::new(self.session.progress_fraction())
                            .animate(true)
                            .fill(palette.accent);
                        ui.add(progress_bar);
                        ui.label(
                            RichText::new(self.session.status_text())
                                .color(ui.visuals().text_color().gamma_multiply(0.7)),
                        );
                    }

                    if let Some(error) = self.session.error() {
                        ui.add_space(20.0);
                        egui::Frame::none()
                            .fill(palette.error_fill)
                            .stroke(egui::Stroke::new(1.0, palette.error_border))
                            .rounding(4.0)
                            .inner_margin(10.0)
                            .show(ui, |ui| {
                                ui.set_width(ui.available_width());
                                ui.colored_label(palette.error_text, error);
                            });
                    }

                    if let Some(result) = self.session.pretty_result() {
                        ui.add_space(20.0);
                        self.render_result(ui, &palette, &result);
                    }

                    ui.add_space(20.0);
                });

            ui.with_layout(egui::Layout::bottom_up(Align::Center), |ui| {
                ui.add_space(8.0);
                ui.label(
                    RichText::new(format!("Server: {}", self.config.server))
                        .small()
                        .color(ui.visuals().text_color().gamma_multiply(0.5)),
                );
            });
        });
    }

    fn render_picker(&mut self, ui: &mut egui::Ui, palette: &Palette) {
        let uploading = self.session.is_uploading();

        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.add_enabled_ui(!uploading, |ui| {
                    if ui.button("📄 Choose File").clicked() {
                        self.pick_file();
                    }
                });

                match self.session.selection_summary() {
                    Some(summary) => ui.label(format!("Selected: {}", summary)),
                    None => ui.label(
                        RichText::new("No file selected")
                            .color(ui.visuals().text_color().gamma_multiply(0.6)),
                    ),
                };
            });
        });

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            ui.add_enabled_ui(self.session.can_submit(), |ui| {
                let label = if uploading {
                    "Uploading..."
                } else {
                    "Upload and Process"
                };
                let button = egui::Button::new(RichText::new(label).color(egui::Color32::WHITE))
                    .fill(palette.accent)
                    .min_size(egui::vec2(180.0, 32.0));
                if ui.add(button).clicked() {
                    self.start_upload();
                }
            });

            if uploading {
                ui.spinner();
            } else if self.session.status() != UploadStatus::Idle && ui.button("🗑 Clear").clicked() {
                self.reset_upload_state();
            }
        });
    }

    fn render_result(&self, ui: &mut egui::Ui, palette: &Palette, result: &str) {
        egui::Frame::none()
            .fill(palette.result_fill)
            .rounding(4.0)
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.heading("Analysis Results:");
                ui.add_space(8.0);
                egui::ScrollArea::vertical()
                    .max_height(320.0)
                    .show(ui, |ui| {
                        ui.add(egui::Label::new(RichText::new(result).monospace()).wrap(true));
                    });
            });
    }
}
