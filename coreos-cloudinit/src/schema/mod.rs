//! The field descriptor model and the CoreOS cloud-config catalog.
//!
//! [`Schema::coreos`] builds every descriptor set once. The resulting value
//! is immutable and is lent by reference to each render call, so a single
//! schema can serve any number of concurrent renders.
//!
//! # Examples
//!
//! ```
//! use coreos_cloudinit::schema::{FieldKind, Schema};
//!
//! let schema = Schema::coreos();
//! let units = schema.root().get("systemd_unit").unwrap();
//! assert_eq!(units.kind(), FieldKind::RepeatedBlock);
//! assert!(units.children().unwrap().get("dropin").is_some());
//! ```

mod descriptor;
pub mod validators;

pub use descriptor::{dash_case, DescriptorSet, FieldDescriptor, FieldKind, ValidateFn, Validation};

/// Notice attached to the legacy etcd block.
pub const ETCD_DEPRECATION: &str =
    "The etcd block has been deprecated by CoreOS in favor of etcd2";

/// The complete, immutable descriptor catalog.
#[derive(Debug, Clone)]
pub struct Schema {
    root: DescriptorSet,
}

impl Schema {
    /// Wraps a custom root set.
    #[must_use]
    pub fn new(root: DescriptorSet) -> Self {
        Self { root }
    }

    /// The CoreOS cloud-config catalog.
    #[must_use]
    pub fn coreos() -> Self {
        let root = DescriptorSet::new("cloud-config")
            .field(FieldDescriptor::boolean("use_shebang"))
            .field(FieldDescriptor::string("hostname"))
            .field(FieldDescriptor::list("ssh_authorized_keys"))
            .field(FieldDescriptor::string("manage_etc_hosts").validator(validators::etc_hosts))
            .field(FieldDescriptor::nested("etcd", etcd()).deprecated(ETCD_DEPRECATION))
            .field(FieldDescriptor::nested("etcd2", etcd2()))
            .field(FieldDescriptor::nested("fleet", fleet()))
            .field(FieldDescriptor::nested("flannel", flannel()))
            .field(FieldDescriptor::nested("locksmith", locksmith()))
            .field(FieldDescriptor::nested("update_strategy", update_strategy()))
            .field(FieldDescriptor::repeated("systemd_unit", systemd_unit()))
            .field(FieldDescriptor::repeated("write_file", write_file()))
            .field(FieldDescriptor::repeated("user", user()));

        Self { root }
    }

    /// The top-level descriptor set.
    #[must_use]
    pub fn root(&self) -> &DescriptorSet {
        &self.root
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::coreos()
    }
}

fn etcd() -> DescriptorSet {
    DescriptorSet::new("etcd")
        .field(FieldDescriptor::string("name").required())
        .field(FieldDescriptor::string("discovery"))
        .field(FieldDescriptor::string("addr"))
        .field(FieldDescriptor::string("peer_addr"))
}

fn etcd2() -> DescriptorSet {
    DescriptorSet::new("etcd2")
        .field(FieldDescriptor::string("name"))
        .field(FieldDescriptor::string("data_dir"))
        .field(FieldDescriptor::string("discovery"))
        .field(FieldDescriptor::string("advertise_client_urls"))
        .field(FieldDescriptor::string("initial_advertise_peer_urls"))
        .field(FieldDescriptor::string("initial_cluster"))
        .field(
            FieldDescriptor::string("initial_cluster_state")
                .validator(validators::initial_cluster_state),
        )
        .field(FieldDescriptor::string("initial_cluster_token"))
        .field(FieldDescriptor::string("listen_client_urls"))
        .field(FieldDescriptor::string("listen_peer_urls"))
        .field(FieldDescriptor::integer("heartbeat_interval"))
        .field(FieldDescriptor::integer("election_timeout"))
        .field(FieldDescriptor::string("proxy").validator(validators::etcd_proxy))
}

fn fleet() -> DescriptorSet {
    DescriptorSet::new("fleet")
        .field(FieldDescriptor::integer("agent_ttl"))
        .field(FieldDescriptor::integer("engine_reconcile_interval"))
        .field(FieldDescriptor::string("etcd_cafile"))
        .field(FieldDescriptor::string("etcd_certfile"))
        .field(FieldDescriptor::string("etcd_keyfile"))
        .field(FieldDescriptor::integer("etcd_request_timeout"))
        .field(FieldDescriptor::list("etcd_servers"))
        .field(FieldDescriptor::list("metadata"))
        .field(FieldDescriptor::string("public_ip"))
        .field(FieldDescriptor::integer("verbosity"))
}

fn flannel() -> DescriptorSet {
    DescriptorSet::new("flannel")
        .field(FieldDescriptor::list("etcd_endpoints"))
        .field(FieldDescriptor::string("etcd_cafile"))
        .field(FieldDescriptor::string("etcd_certfile"))
        .field(FieldDescriptor::string("etcd_keyfile"))
        .field(FieldDescriptor::string("etcd_prefix"))
        .field(FieldDescriptor::boolean("ip_masq"))
        .field(FieldDescriptor::string("subnet_file"))
        .field(FieldDescriptor::string("interface"))
        .field(FieldDescriptor::string("public_ip"))
}

fn locksmith() -> DescriptorSet {
    DescriptorSet::new("locksmith")
        .field(FieldDescriptor::list("endpoint"))
        .field(FieldDescriptor::string("etcd_cafile"))
        .field(FieldDescriptor::string("etcd_certfile"))
        .field(FieldDescriptor::string("etcd_keyfile"))
        .field(FieldDescriptor::string("group"))
        .field(FieldDescriptor::string("window_start"))
        .field(FieldDescriptor::string("window_length"))
}

fn update_strategy() -> DescriptorSet {
    DescriptorSet::new("update_strategy")
        .field(FieldDescriptor::string("reboot_strategy").validator(validators::reboot_strategy))
        .field(FieldDescriptor::string("server"))
        .field(FieldDescriptor::string("group"))
}

fn systemd_unit() -> DescriptorSet {
    DescriptorSet::new("systemd_unit")
        .field(FieldDescriptor::string("name").required())
        .field(FieldDescriptor::string("content"))
        .field(FieldDescriptor::boolean("runtime"))
        .field(FieldDescriptor::boolean("enable"))
        .field(FieldDescriptor::string("command").validator(validators::unit_command))
        .field(FieldDescriptor::boolean("mask"))
        .field(FieldDescriptor::repeated("dropin", dropin()))
}

fn dropin() -> DescriptorSet {
    DescriptorSet::new("dropin")
        .field(FieldDescriptor::string("name").required())
        .field(FieldDescriptor::string("content").required())
}

fn write_file() -> DescriptorSet {
    DescriptorSet::new("write_file")
        .field(FieldDescriptor::string("path").required())
        .field(FieldDescriptor::string("content").required())
        .field(FieldDescriptor::string("permissions").validator(validators::file_permissions))
        .field(FieldDescriptor::string("owner"))
        .field(FieldDescriptor::string("encoding").validator(validators::file_encoding))
}

fn user() -> DescriptorSet {
    DescriptorSet::new("user")
        .field(FieldDescriptor::string("name").required())
        .field(FieldDescriptor::string("passwd"))
        .field(FieldDescriptor::string("gecos"))
        .field(FieldDescriptor::string("homedir"))
        .field(FieldDescriptor::string("primary_group"))
        .field(FieldDescriptor::string("shell"))
        .field(FieldDescriptor::string("coreos_ssh_import_github"))
        .field(FieldDescriptor::string("coreos_ssh_import_url"))
        .field(FieldDescriptor::list("groups"))
        .field(FieldDescriptor::list("ssh_authorized_keys"))
        .field(FieldDescriptor::list("coreos_ssh_import_github_users"))
        .field(FieldDescriptor::boolean("no_create_home"))
        .field(FieldDescriptor::boolean("no_user_group"))
        .field(FieldDescriptor::boolean("system"))
        .field(FieldDescriptor::boolean("no_log_init"))
        .field(FieldDescriptor::boolean("lock_passwd"))
}
