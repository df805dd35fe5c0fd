// region:    --- Imports
use super::{format_amount, ErrorSink, ListingCard, Location, NavLinks, Navigator};
use crate::detail::AuctionDetailView;
use crate::profile::ProfileView;
use crate::search::SearchResults;
use std::fmt;
use tracing::{error, info};
// endregion: --- Imports

// region:    --- Terminal Sinks
/// 표준 에러로 에러 메시지 출력
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalErrorSink;

impl ErrorSink for TerminalErrorSink {
    fn display_error(&self, message: &str) {
        error!("{:<12} --> {}", "Ui", message);
        eprintln!("⚠ {}", message);
    }
}

/// 터미널에서는 이동할 페이지 경로만 출력
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, to: &Location) {
        info!("{:<12} --> 페이지 이동: {}", "Ui", to.href());
        println!("→ {}", to.href());
    }
}
// endregion: --- Terminal Sinks

// region:    --- Display
impl fmt::Display for ListingCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "┌ {}", self.title)?;
        writeln!(f, "│ Current Bid: {} credits", format_amount(self.current_bid))?;
        writeln!(f, "│ {}", self.description)?;
        writeln!(f, "│ image: {} ({})", self.image.url, self.image.alt)?;
        write!(f, "└ {}", self.href)
    }
}

impl fmt::Display for AuctionDetailView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.chars().count().max(3)))?;
        if let Some(seller) = &self.seller {
            writeln!(f, "Seller: {}", seller)?;
        }
        writeln!(f, "Current bid: {} Credits", self.current_bid_label)?;
        if !self.description.is_empty() {
            writeln!(f, "{}", self.description)?;
        }
        if self.has_ended {
            writeln!(f, "{}", self.countdown)?;
        } else {
            writeln!(f, "This Auction Ends at: {} ({})", self.ends_at, self.countdown)?;
        }

        let slide = self.carousel.current();
        write!(f, "Image: {} ({})", slide.url, slide.alt)?;
        if self.carousel.has_controls() {
            write!(f, " [1/{}]", self.carousel.slides.len())?;
        }
        writeln!(f)?;

        if let Some(controls) = &self.owner_controls {
            writeln!(f, "[edit: {}] [delete: {}]", controls.edit.href(), controls.delete_listing_id)?;
        }

        writeln!(f)?;
        writeln!(f, "{}", self.bid_section.heading)?;
        if let Some(body) = &self.bid_section.body {
            writeln!(f, "{}", body)?;
        }
        if self.bid_section.show_login_link {
            writeln!(f, "→ {}", Location::Login.href())?;
        }

        if let Some(message) = self.empty_bids_message() {
            writeln!(f, "{}", message)?;
        } else if let Some(bids) = &self.bids {
            writeln!(f, "Placed Bids")?;
            for bid in bids {
                writeln!(
                    f,
                    "  {} bid {} Credits  (Created: {})",
                    bid.bidder,
                    format_amount(bid.amount),
                    bid.created
                )?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for ProfileView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(banner) = &self.banner {
            writeln!(f, "[banner: {} ({})]", banner.url, banner.alt)?;
        }
        if let Some(avatar) = &self.avatar {
            writeln!(f, "[avatar: {} ({})]", avatar.url, avatar.alt)?;
        }
        writeln!(f, "{}", self.name)?;
        if !self.bio.is_empty() {
            writeln!(f, "{}", self.bio)?;
        }
        writeln!(f, "Credits: {}", self.credits)?;
        writeln!(f, "Edit Profile → {}", self.edit.href())?;
        writeln!(f)?;
        writeln!(f, "My listings ({})", self.listings.len())?;
        for card in &self.listings {
            writeln!(f, "{}", card)?;
        }
        Ok(())
    }
}

impl fmt::Display for SearchResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchResults::Cleared => Ok(()),
            SearchResults::Failed(message) => write!(f, "{}", message),
            SearchResults::Results { heading, cards } => {
                writeln!(f, "{}", heading)?;
                if let Some(message) = self.no_results_message() {
                    return writeln!(f, "{}", message);
                }
                for card in cards {
                    writeln!(f, "{}", card)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for NavLinks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let links = [
            (self.login, "Log in"),
            (self.register, "Register"),
            (self.create_auction, "Create Auction"),
            (self.my_profile, "My Profile"),
            (self.logout, "Log out"),
        ];
        let visible: Vec<&str> = links.iter().filter(|(v, _)| *v).map(|(_, l)| *l).collect();
        write!(f, "{}", visible.join(" | "))
    }
}
// endregion: --- Display
