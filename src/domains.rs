use std::fmt;

/// Traffic category assigned to every generated query.
///
/// The order of `ALL` is fixed: weight vectors index into it, and profile
/// derivation assigns digest segments to categories by this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
	Normal,
	Cdn,
	Suspicious,
	Dga,
	Malware,
	Ads,
	Tracking,
}

impl Category {
	pub const ALL: [Category; 7] = [
		Category::Normal,
		Category::Cdn,
		Category::Suspicious,
		Category::Dga,
		Category::Malware,
		Category::Ads,
		Category::Tracking,
	];

	/// Position in the fixed category order.
	pub fn index(self) -> usize {
		match self {
			Category::Normal => 0,
			Category::Cdn => 1,
			Category::Suspicious => 2,
			Category::Dga => 3,
			Category::Malware => 4,
			Category::Ads => 5,
			Category::Tracking => 6,
		}
	}

	pub fn name(self) -> &'static str {
		match self {
			Category::Normal => "normal",
			Category::Cdn => "cdn",
			Category::Suspicious => "suspicious",
			Category::Dga => "dga",
			Category::Malware => "malware",
			Category::Ads => "ads",
			Category::Tracking => "tracking",
		}
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Well-known sites an ordinary workstation resolves all day.
static NORMAL: &[&str] = &[
	"google.com", "youtube.com", "facebook.com", "twitter.com", "instagram.com",
	"linkedin.com", "github.com", "stackoverflow.com", "reddit.com", "amazon.com",
	"microsoft.com", "apple.com", "netflix.com", "spotify.com", "dropbox.com",
	"slack.com", "zoom.us", "salesforce.com", "adobe.com", "oracle.com",
	"ibm.com", "intel.com", "nvidia.com", "amd.com", "cisco.com",
	"vmware.com", "docker.com", "kubernetes.io", "terraform.io", "ansible.com",
	"python.org", "nodejs.org", "golang.org", "rust-lang.org", "java.com",
	"wikipedia.org", "bbc.com", "cnn.com", "nytimes.com", "theguardian.com",
	"weather.com", "maps.google.com", "drive.google.com", "docs.google.com",
	"outlook.com", "office.com", "teams.microsoft.com", "onedrive.com",
];

static CDN: &[&str] = &[
	"cdn.jsdelivr.net", "cdnjs.cloudflare.com", "unpkg.com", "cdn.bootcdn.net",
	"ajax.googleapis.com", "fonts.googleapis.com", "fonts.gstatic.com",
	"cloudflare.com", "akamai.net", "fastly.net", "cloudfront.net",
	"azureedge.net", "edgecastcdn.net", "stackpath.com", "cdn77.com",
	"bunnycdn.com", "keycdn.com", "jsdelivr.net", "staticfile.org",
];

/// Scam and phishing bait patterns.
static SUSPICIOUS: &[&str] = &[
	"free-prize-winner.com", "claim-your-reward.net", "urgent-update-required.com",
	"security-alert-login.com", "account-verify-now.net", "password-reset-urgent.com",
	"lottery-winner-2024.com", "free-iphone-giveaway.net", "click-here-money.com",
	"crypto-doubler-fast.com", "investment-guaranteed.net", "quick-loan-approve.com",
	"dating-singles-near.com", "weight-loss-miracle.net", "anti-aging-secret.com",
];

/// Synthetic malware-associated names; these are test-category hostnames,
/// not live infrastructure.
static MALWARE: &[&str] = &[
	"malware.testcategory.com", "virus-download.evil.com", "trojan-payload.bad.net",
	"ransomware-c2.malicious.org", "botnet-controller.dark.com", "keylogger-drop.hack.net",
	"cryptominer-pool.mine.com", "exploit-kit.attack.org", "phishing-kit.steal.net",
];

static ADS: &[&str] = &[
	"doubleclick.net", "googlesyndication.com", "googleadservices.com",
	"adsserver.com", "adservice.google.com", "pagead2.googlesyndication.com",
	"ads.facebook.com", "ads.twitter.com", "advertising.com", "adnxs.com",
	"moatads.com", "adsrvr.org", "pubmatic.com", "rubiconproject.com",
];

static TRACKING: &[&str] = &[
	"google-analytics.com", "analytics.google.com", "connect.facebook.net",
	"hotjar.com", "mixpanel.com", "segment.io", "amplitude.com",
	"heap.io", "fullstory.com", "mouseflow.com", "crazyegg.com",
];

/// Return the static catalog for a category.
///
/// `dga` carries no catalog (names are synthesized per query); it maps to
/// the `normal` catalog here so that any lookup still yields a resolvable
/// pool of domains.
pub fn catalog(category: Category) -> &'static [&'static str] {
	match category {
		Category::Normal | Category::Dga => NORMAL,
		Category::Cdn => CDN,
		Category::Suspicious => SUSPICIOUS,
		Category::Malware => MALWARE,
		Category::Ads => ADS,
		Category::Tracking => TRACKING,
	}
}
