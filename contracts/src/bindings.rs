//! `sol!`-generated bindings for the factory and ticket contracts.
//!
//! The interfaces mirror the deployed ABIs. Return values are named so the
//! generated call structs expose named fields instead of positional ones.

use alloy::sol;

sol! {
    /// Registry contract that deploys and indexes individual event-ticket
    /// contracts, and holds the platform fee configuration.
    #[allow(missing_docs)]
    #[sol(rpc)]
    #[derive(Debug)]
    interface IEventFactory {
        event EventCreated(
            address indexed eventContract,
            address indexed organizer,
            string eventName,
            uint256 eventDate,
            uint256 ticketPrice,
            uint256 maxTickets
        );

        function createEvent(
            string memory name,
            string memory symbol,
            string memory eventName,
            string memory eventDescription,
            uint256 eventDate,
            string memory eventLocation,
            uint256 ticketPrice,
            uint256 maxTickets,
            string memory baseTokenURI
        ) external returns (address eventContract);

        function getAllEvents() external view returns (address[] memory events);
        function getOrganizerEvents(address organizer) external view returns (address[] memory events);
        function getEventsPaginated(uint256 offset, uint256 limit) external view returns (address[] memory events);
        function totalEvents() external view returns (uint256 total);
        function allEvents(uint256 index) external view returns (address eventContract);
        function isEventContract(address candidate) external view returns (bool known);

        function platformFeeBps() external view returns (uint256 feeBps);
        function platformWallet() external view returns (address wallet);
        function owner() external view returns (address owner);
        function setPlatformFee(uint256 feeBps) external;
        function setPlatformWallet(address wallet) external;
        function transferOwnership(address newOwner) external;
    }

    /// One event's NFT ticket contract: details, minting, check-in and
    /// organizer funds.
    #[allow(missing_docs)]
    #[sol(rpc)]
    #[derive(Debug)]
    interface IEventTicket {
        function getEventDetails()
            external
            view
            returns (
                string memory name,
                string memory description,
                uint256 date,
                string memory location,
                uint256 price,
                uint256 maxSupply,
                uint256 sold,
                uint256 remaining
            );

        function ticketPrice() external view returns (uint256 price);
        function ticketsRemaining() external view returns (uint256 remaining);
        function ticketUsed(uint256 tokenId) external view returns (bool used);

        function mintTicket() external payable;
        function mintTickets(uint256 quantity) external payable;
        function useTicket(uint256 tokenId) external;
        function withdraw() external;

        function getUserTickets(address holder) external view returns (uint256[] memory tokenIds);
        function balanceOf(address holder) external view returns (uint256 balance);
        function ownerOf(uint256 tokenId) external view returns (address owner);
        function tokenURI(uint256 tokenId) external view returns (string memory uri);
        function owner() external view returns (address owner);
    }
}
